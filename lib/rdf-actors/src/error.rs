use rdf_actors_core::ActorError;

/// An error raised by a [QueryEngine](crate::QueryEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An error raised while evaluating a query operation.
    #[error("Failed to evaluate query operation: {0}")]
    Query(#[source] ActorError),
    /// An error raised while discovering the links of a page.
    #[error("Failed to resolve hypermedia links: {0}")]
    Links(#[source] ActorError),
    /// An error raised while scoring a statement.
    #[error("Failed to score statement: {0}")]
    Score(#[source] ActorError),
}

impl EngineError {
    /// Returns the error of the actor or mediator that caused this error.
    pub fn actor_error(&self) -> &ActorError {
        match self {
            EngineError::Query(error) | EngineError::Links(error) | EngineError::Score(error) => {
                error
            }
        }
    }
}
