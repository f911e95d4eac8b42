use itertools::Itertools;
use oxrdf::Variable;
use spargebra::term::{GraphNamePattern, NamedNodePattern, QuadPattern, TermPattern};

/// Returns the variables of a single quad pattern in the order subject, predicate, object,
/// graph. A variable that occurs in multiple positions is returned multiple times.
pub fn pattern_variables(pattern: &QuadPattern) -> impl Iterator<Item = &Variable> {
    let subject = match &pattern.subject {
        TermPattern::Variable(variable) => Some(variable),
        _ => None,
    };
    let predicate = match &pattern.predicate {
        NamedNodePattern::Variable(variable) => Some(variable),
        NamedNodePattern::NamedNode(_) => None,
    };
    let object = match &pattern.object {
        TermPattern::Variable(variable) => Some(variable),
        _ => None,
    };
    let graph = match &pattern.graph_name {
        GraphNamePattern::Variable(variable) => Some(variable),
        GraphNamePattern::NamedNode(_) | GraphNamePattern::DefaultGraph => None,
    };
    [subject, predicate, object, graph].into_iter().flatten()
}

/// Returns all variables that occur in `template`.
///
/// Each variable is returned once, in the order of its first occurrence.
pub fn template_variables(template: &[QuadPattern]) -> Vec<Variable> {
    template
        .iter()
        .flat_map(pattern_variables)
        .unique()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    fn iri(iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    fn pattern(
        subject: impl Into<TermPattern>,
        predicate: impl Into<NamedNodePattern>,
        object: impl Into<TermPattern>,
        graph_name: impl Into<GraphNamePattern>,
    ) -> QuadPattern {
        QuadPattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }

    #[test]
    fn template_variables_first_seen_order() {
        let template = vec![
            pattern(
                var("s"),
                iri("http://example.com/p"),
                var("o"),
                GraphNamePattern::DefaultGraph,
            ),
            pattern(var("o"), var("p"), var("s"), var("g")),
        ];

        assert_eq!(
            template_variables(&template),
            vec![var("s"), var("o"), var("p"), var("g")]
        );
    }

    #[test]
    fn template_variables_is_stable() {
        let template = vec![pattern(
            var("b"),
            var("a"),
            var("b"),
            GraphNamePattern::DefaultGraph,
        )];

        let first = template_variables(&template);
        for _ in 0..3 {
            assert_eq!(template_variables(&template), first);
        }
        assert_eq!(first, vec![var("b"), var("a")]);
    }

    #[test]
    fn ground_template_has_no_variables() {
        let template = vec![pattern(
            iri("http://example.com/s"),
            iri("http://example.com/p"),
            iri("http://example.com/o"),
            GraphNamePattern::DefaultGraph,
        )];

        assert!(template_variables(&template).is_empty());
    }
}
