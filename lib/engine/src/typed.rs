use crate::operation::TypedOperation;
use crate::output::{QueryOperationAction, QueryOperationKind, QueryOperationOutput};
use async_trait::async_trait;
use rdf_actors_core::{Actor, ActorError, ActorResult};
use rdf_actors_model::ActionContext;
use std::fmt::Debug;

/// Handles exactly one variant of [QueryOperation](crate::QueryOperation).
///
/// A handler only sees operations of its own type. Wrapping it in a [TypedOperationActor] (see
/// [TypedOperationHandler::into_actor]) rejects all other operations during the test phase.
#[async_trait]
pub trait TypedOperationHandler: Debug + Send + Sync + 'static {
    /// The operation that this handler supports.
    type Operation: TypedOperation;

    /// Decides whether the handler can evaluate `operation`.
    ///
    /// This is only called for operations of the supported type. The default implementation
    /// accepts all of them.
    async fn test_operation(
        &self,
        _operation: &Self::Operation,
        _context: &ActionContext,
    ) -> ActorResult<()> {
        Ok(())
    }

    /// Evaluates `operation`.
    async fn run_operation(
        &self,
        operation: &Self::Operation,
        context: &ActionContext,
    ) -> ActorResult<QueryOperationOutput>;

    /// Wraps this handler into an actor for the query operation bus.
    fn into_actor(self, name: impl Into<String>) -> TypedOperationActor<Self>
    where
        Self: Sized,
    {
        TypedOperationActor::new(name, self)
    }
}

/// An actor that dispatches operations of a single type to a [TypedOperationHandler].
#[derive(Debug)]
pub struct TypedOperationActor<H> {
    name: String,
    handler: H,
}

impl<H: TypedOperationHandler> TypedOperationActor<H> {
    pub fn new(name: impl Into<String>, handler: H) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

#[async_trait]
impl<H: TypedOperationHandler> Actor<QueryOperationKind> for TypedOperationActor<H> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, action: &QueryOperationAction) -> ActorResult<()> {
        let Some(operation) = H::Operation::from_operation(&action.operation) else {
            return ActorError::not_applicable(
                &self.name,
                format!(
                    "Actor only supports {} operations, but got {}",
                    H::Operation::TYPE,
                    action.operation.operation_type()
                ),
            );
        };
        self.handler.test_operation(operation, &action.context).await
    }

    async fn run(&self, action: &QueryOperationAction) -> ActorResult<QueryOperationOutput> {
        let Some(operation) = H::Operation::from_operation(&action.operation) else {
            return ActorError::internal(format!(
                "Actor {} was run on a {} operation without passing its test",
                self.name,
                action.operation.operation_type()
            ));
        };
        tracing::trace!(actor = %self.name, operation = %H::Operation::TYPE, "Running operation");
        self.handler.run_operation(operation, &action.context).await
    }
}
