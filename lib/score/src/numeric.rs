use crate::bus::{ScoreAction, ScoreKind, ScoreOutput, ScoreTest};
use crate::score::RdfScore;
use async_trait::async_trait;
use rdf_actors_core::{Actor, ActorResult};
use rdf_actors_model::{vocab::xsd, Double, LiteralRef, NamedNodeRef, Term, TermRef};

const NUMERIC_DATATYPES: [NamedNodeRef<'static>; 16] = [
    xsd::INTEGER,
    xsd::DECIMAL,
    xsd::FLOAT,
    xsd::DOUBLE,
    xsd::INT,
    xsd::LONG,
    xsd::SHORT,
    xsd::BYTE,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::UNSIGNED_INT,
    xsd::UNSIGNED_LONG,
    xsd::UNSIGNED_SHORT,
    xsd::UNSIGNED_BYTE,
];

/// Scores numeric literals by their distance to the closest expected value.
///
/// The score is `1 / (1 + d)` where `d` is the absolute difference to the closest numeric
/// expected value. Values that are not valid numbers are inadmissible. If no numeric values are
/// expected for the statement, it scores 1.
#[derive(Debug)]
pub struct NumericDistanceScoreActor {
    name: String,
}

impl NumericDistanceScoreActor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Actor<ScoreKind> for NumericDistanceScoreActor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, action: &ScoreAction) -> ActorResult<ScoreTest> {
        let suitable = match action.value() {
            TermRef::Literal(literal) => is_numeric(literal),
            _ => false,
        };
        Ok(ScoreTest { suitable })
    }

    async fn run(&self, action: &ScoreAction) -> ActorResult<ScoreOutput> {
        let TermRef::Literal(literal) = action.value() else {
            return Ok(ScoreOutput::Single(RdfScore::Inadmissible));
        };
        let Some(value) = numeric_value(literal) else {
            tracing::debug!(
                actor = %self.name,
                literal = %literal,
                "Literal is not a valid number"
            );
            return Ok(ScoreOutput::Single(RdfScore::Inadmissible));
        };

        let distance = action
            .extract_expected_values()
            .iter()
            .filter_map(|term| match term {
                Term::Literal(literal) if is_numeric(literal.as_ref()) => {
                    numeric_value(literal.as_ref())
                }
                _ => None,
            })
            .map(|expected| (value - expected).abs())
            .reduce(f64::min);

        let score = match distance {
            None => RdfScore::BEST,
            Some(distance) => {
                RdfScore::new(1.0 / (1.0 + distance)).unwrap_or(RdfScore::Inadmissible)
            }
        };
        Ok(ScoreOutput::Single(score))
    }
}

fn is_numeric(literal: LiteralRef<'_>) -> bool {
    NUMERIC_DATATYPES.contains(&literal.datatype())
}

/// Parses the lexical form of a numeric literal. Returns `None` for invalid lexical forms and
/// NaN.
fn numeric_value(literal: LiteralRef<'_>) -> Option<f64> {
    let value = f64::from(literal.value().trim().parse::<Double>().ok()?);
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_actors_model::{GraphName, Literal, NamedNode, Quad};

    fn action(object: Literal, expected: Vec<Term>) -> ScoreAction {
        let mut values = crate::ExpectedValues::default();
        values.insert(xsd::INTEGER.as_str().to_owned(), expected);
        ScoreAction::new(Quad::new(
            NamedNode::new_unchecked("http://example.com/s"),
            NamedNode::new_unchecked("http://example.com/p"),
            object,
            GraphName::DefaultGraph,
        ))
        .with_expected_datatype_values(values)
    }

    #[tokio::test]
    async fn only_numeric_literals_are_suitable() -> ActorResult<()> {
        let actor = NumericDistanceScoreActor::new("numeric");

        let numeric = actor.test(&action(Literal::from(3), vec![])).await?;
        let string = actor.test(&action(Literal::from("3"), vec![])).await?;

        assert!(numeric.suitable);
        assert!(!string.suitable);
        Ok(())
    }

    #[tokio::test]
    async fn scores_distance_to_closest_value() -> ActorResult<()> {
        let actor = NumericDistanceScoreActor::new("numeric");

        let output = actor
            .run(&action(
                Literal::from(5),
                vec![Literal::from(9).into(), Literal::from(4).into()],
            ))
            .await?;

        assert_eq!(output, ScoreOutput::Single(RdfScore::Score(0.5)));
        Ok(())
    }

    #[tokio::test]
    async fn exact_match_scores_best() -> ActorResult<()> {
        let actor = NumericDistanceScoreActor::new("numeric");

        let output = actor
            .run(&action(Literal::from(5), vec![Literal::from(5).into()]))
            .await?;

        assert_eq!(output, ScoreOutput::Single(RdfScore::BEST));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_number_is_inadmissible() -> ActorResult<()> {
        let actor = NumericDistanceScoreActor::new("numeric");
        let invalid = Literal::new_typed_literal("five", xsd::INTEGER);

        let output = actor
            .run(&action(invalid, vec![Literal::from(5).into()]))
            .await?;

        assert_eq!(output, ScoreOutput::Single(RdfScore::Inadmissible));
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_expected_values_are_ignored() -> ActorResult<()> {
        let actor = NumericDistanceScoreActor::new("numeric");

        let output = actor
            .run(&action(Literal::from(5), vec![Literal::from("5").into()]))
            .await?;

        assert_eq!(output, ScoreOutput::Single(RdfScore::BEST));
        Ok(())
    }
}
