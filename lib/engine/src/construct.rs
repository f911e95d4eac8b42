use crate::operation::{ConstructOperation, QueryOperation};
use crate::output::{
    MetadataFuture, QueryOperationAction, QueryOperationMediatorRef, QueryOperationOutput,
    QuadsOutput,
};
use crate::results::QuadStream;
use crate::transform::MultiTransformExt;
use crate::typed::TypedOperationHandler;
use async_trait::async_trait;
use futures::{FutureExt, TryFutureExt};
use rdf_actors_core::ActorResult;
use rdf_actors_model::{
    template_variables, ActionContext, BindingSet, BlankNode, GraphName, GraphNamePattern,
    Metadata, NamedNode, NamedNodePattern, Quad, QuadPattern, Subject, Term, TermPattern,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Evaluates CONSTRUCT operations.
///
/// The input of the operation is projected onto the variables of the template and evaluated
/// through the mediator. Every solution is then expanded into one quad per template pattern.
/// Patterns that cannot be instantiated for a solution are skipped for that solution.
#[derive(Debug)]
pub struct ConstructHandler {
    mediator: QueryOperationMediatorRef,
}

impl ConstructHandler {
    pub fn new(mediator: QueryOperationMediatorRef) -> Self {
        Self { mediator }
    }
}

#[async_trait]
impl TypedOperationHandler for ConstructHandler {
    type Operation = ConstructOperation;

    async fn run_operation(
        &self,
        operation: &ConstructOperation,
        context: &ActionContext,
    ) -> ActorResult<QueryOperationOutput> {
        let variables = template_variables(&operation.template);
        if variables.is_empty() {
            tracing::debug!("Template has no variables, skipping the evaluation of the input");
            return Ok(QueryOperationOutput::Quads(QuadsOutput {
                stream: QuadStream::empty(),
                metadata: Some(futures::future::ready(Ok(Metadata::with_total_items(0))).boxed()),
            }));
        }

        let input = QueryOperation::project(operation.input.as_ref().clone(), variables);
        tracing::debug!(operation = %input, "Evaluating projected input of CONSTRUCT");
        let bindings = self
            .mediator
            .mediate(&QueryOperationAction::new(input, context.clone()))
            .await?
            .into_bindings()?;

        let template = Arc::<[QuadPattern]>::from(operation.template.as_slice());
        let pattern_count = u64::try_from(template.len()).unwrap_or(u64::MAX);
        let stream = bindings
            .stream
            .multi_transform(move |solution| Ok(instantiate_template(&template, &solution)));

        Ok(QueryOperationOutput::Quads(QuadsOutput {
            stream: QuadStream::new(stream),
            metadata: bindings
                .metadata
                .map(|metadata| scale_total_items(metadata, pattern_count)),
        }))
    }
}

/// Multiplies the cardinality estimate of `metadata` by the number of patterns. Metadata without
/// an estimate is returned unchanged.
fn scale_total_items(metadata: MetadataFuture, pattern_count: u64) -> MetadataFuture {
    metadata
        .map_ok(move |mut metadata| {
            metadata.total_items = metadata
                .total_items
                .map(|total_items| total_items.saturating_mul(pattern_count));
            metadata
        })
        .boxed()
}

/// Instantiates every pattern of `template` with the terms bound in `solution`.
///
/// Blank nodes of the template are replaced by fresh blank nodes that are shared by all patterns
/// of this solution.
fn instantiate_template(template: &[QuadPattern], solution: &BindingSet) -> Vec<Quad> {
    let mut blank_nodes = FxHashMap::default();
    template
        .iter()
        .filter_map(|pattern| instantiate_pattern(pattern, solution, &mut blank_nodes))
        .collect()
}

fn instantiate_pattern(
    pattern: &QuadPattern,
    solution: &BindingSet,
    blank_nodes: &mut FxHashMap<BlankNode, BlankNode>,
) -> Option<Quad> {
    let subject = match instantiate_term(&pattern.subject, solution, blank_nodes)? {
        Term::NamedNode(node) => Subject::NamedNode(node),
        Term::BlankNode(node) => Subject::BlankNode(node),
        Term::Literal(_) => return None,
    };
    let predicate = match &pattern.predicate {
        NamedNodePattern::NamedNode(node) => node.clone(),
        NamedNodePattern::Variable(variable) => named_node(solution.get(variable)?)?,
    };
    let object = instantiate_term(&pattern.object, solution, blank_nodes)?;
    let graph_name = match &pattern.graph_name {
        GraphNamePattern::DefaultGraph => GraphName::DefaultGraph,
        GraphNamePattern::NamedNode(node) => GraphName::NamedNode(node.clone()),
        GraphNamePattern::Variable(variable) => match solution.get(variable)? {
            Term::NamedNode(node) => GraphName::NamedNode(node.clone()),
            Term::BlankNode(node) => GraphName::BlankNode(node.clone()),
            Term::Literal(_) => return None,
        },
    };
    Some(Quad::new(subject, predicate, object, graph_name))
}

fn instantiate_term(
    pattern: &TermPattern,
    solution: &BindingSet,
    blank_nodes: &mut FxHashMap<BlankNode, BlankNode>,
) -> Option<Term> {
    match pattern {
        TermPattern::NamedNode(node) => Some(node.clone().into()),
        TermPattern::Literal(literal) => Some(literal.clone().into()),
        TermPattern::BlankNode(node) => Some(
            blank_nodes
                .entry(node.clone())
                .or_default()
                .clone()
                .into(),
        ),
        TermPattern::Variable(variable) => solution.get(variable).cloned(),
    }
}

fn named_node(term: &Term) -> Option<NamedNode> {
    match term {
        Term::NamedNode(node) => Some(node.clone()),
        _ => None,
    }
}
