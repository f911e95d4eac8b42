use crate::operation::ValuesOperation;
use crate::output::{BindingsOutput, QueryOperationOutput};
use crate::results::BindingsStream;
use crate::typed::TypedOperationHandler;
use async_trait::async_trait;
use futures::FutureExt;
use rdf_actors_core::{ActorError, ActorResult};
use rdf_actors_model::{ActionContext, BindingSet, Metadata, Variable};
use std::sync::Arc;

/// Evaluates inline tables of solutions.
#[derive(Debug, Default)]
pub struct ValuesHandler;

impl ValuesHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypedOperationHandler for ValuesHandler {
    type Operation = ValuesOperation;

    async fn test_operation(
        &self,
        operation: &ValuesOperation,
        _context: &ActionContext,
    ) -> ActorResult<()> {
        let width = operation.variables.len();
        if let Some(row) = operation.rows.iter().find(|row| row.len() != width) {
            return ActorError::contract_violation(format!(
                "A row of a values operation has {} entries but {width} variables are declared",
                row.len()
            ));
        }
        Ok(())
    }

    async fn run_operation(
        &self,
        operation: &ValuesOperation,
        _context: &ActionContext,
    ) -> ActorResult<QueryOperationOutput> {
        let variables = Arc::<[Variable]>::from(operation.variables.as_slice());
        let total_items = u64::try_from(operation.rows.len()).unwrap_or(u64::MAX);
        let solutions = operation
            .rows
            .clone()
            .into_iter()
            .map(move |row| Ok(BindingSet::from((Arc::clone(&variables), row))));

        Ok(QueryOperationOutput::Bindings(BindingsOutput {
            stream: BindingsStream::new(futures::stream::iter(solutions)),
            metadata: Some(
                futures::future::ready(Ok(Metadata::with_total_items(total_items))).boxed(),
            ),
            variables: operation.variables.clone(),
        }))
    }
}
