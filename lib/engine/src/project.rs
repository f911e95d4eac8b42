use crate::operation::ProjectOperation;
use crate::output::{
    BindingsOutput, QueryOperationAction, QueryOperationMediatorRef, QueryOperationOutput,
};
use crate::results::BindingsStream;
use crate::typed::TypedOperationHandler;
use async_trait::async_trait;
use futures::StreamExt;
use rdf_actors_core::ActorResult;
use rdf_actors_model::{ActionContext, BindingSet, Variable};
use std::sync::Arc;

/// Evaluates projections by restricting every solution of the input to the projected variables.
///
/// The metadata of the input is passed through unchanged.
#[derive(Debug)]
pub struct ProjectHandler {
    mediator: QueryOperationMediatorRef,
}

impl ProjectHandler {
    pub fn new(mediator: QueryOperationMediatorRef) -> Self {
        Self { mediator }
    }
}

#[async_trait]
impl TypedOperationHandler for ProjectHandler {
    type Operation = ProjectOperation;

    async fn run_operation(
        &self,
        operation: &ProjectOperation,
        context: &ActionContext,
    ) -> ActorResult<QueryOperationOutput> {
        let input = self
            .mediator
            .mediate(&QueryOperationAction::new(
                operation.input.as_ref().clone(),
                context.clone(),
            ))
            .await?
            .into_bindings()?;

        let variables = Arc::<[Variable]>::from(operation.variables.as_slice());
        let stream = {
            let variables = Arc::clone(&variables);
            input
                .stream
                .map(move |solution| solution.map(|solution| restrict(&variables, &solution)))
        };

        Ok(QueryOperationOutput::Bindings(BindingsOutput {
            stream: BindingsStream::new(stream),
            metadata: input.metadata,
            variables: variables.to_vec(),
        }))
    }
}

fn restrict(variables: &Arc<[Variable]>, solution: &BindingSet) -> BindingSet {
    let values = variables
        .iter()
        .map(|variable| solution.get(variable).cloned())
        .collect::<Vec<_>>();
    BindingSet::from((Arc::clone(variables), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::QueryOperation;
    use crate::test_utils::{bindings_output, iri, mediator, solution, var, RecordingActor};
    use rdf_actors_core::Actor;
    use rdf_actors_model::Metadata;

    #[tokio::test]
    async fn restricts_solutions_to_projected_variables() -> ActorResult<()> {
        let recording = Arc::new(RecordingActor::new(|_| {
            Ok(bindings_output(
                vec![var("s"), var("p"), var("o")],
                vec![solution(vec![
                    ("s", Some(iri("s").into())),
                    ("p", Some(iri("p").into())),
                    ("o", Some(iri("o").into())),
                ])],
                Some(Metadata::with_total_items(1)),
            ))
        }));
        let actor = ProjectHandler::new(mediator(vec![Arc::clone(&recording) as _]))
            .into_actor("project");
        let operation = QueryOperation::project(
            QueryOperation::values(vec![], vec![]),
            vec![var("o"), var("missing")],
        );

        let output = actor
            .run(&QueryOperationAction::new(operation, ActionContext::new()))
            .await?;

        assert_eq!(output.variables(), &[var("o"), var("missing")]);
        let bindings = output.into_bindings()?;
        let Some(metadata) = bindings.metadata else {
            panic!("Expected metadata");
        };
        assert_eq!(metadata.await?.total_items, Some(1));
        let solutions = bindings.stream.try_collect_to_vec().await?;
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("o"), Some(&iri("o").into()));
        assert_eq!(solutions[0].get("s"), None);
        assert_eq!(solutions[0].get("missing"), None);
        Ok(())
    }
}
