use std::error::Error;

/// The result of testing or running an actor.
pub type ActorResult<T> = Result<T, ActorError>;

/// An error raised by an actor or a mediator.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ActorError {
    /// An actor cannot handle an action. This is the expected outcome of a negative test and is
    /// not a failure of the actor.
    #[error("Actor {actor} can not handle the action: {reason}")]
    NotApplicable { actor: String, reason: String },
    /// No actor on a bus could handle an action.
    #[error("No actor on bus {bus} could handle the {kind} action. {reasons}")]
    Unhandled {
        bus: String,
        kind: &'static str,
        reasons: String,
    },
    /// A collaborator returned something other than what its contract promises.
    #[error("Contract violation: {0}")]
    ContractViolation(String),
    /// An error while pulling or producing the elements of a stream.
    #[error("Error in result stream: {0}")]
    Stream(String),
    /// An actor accepted an action but failed while running it.
    #[error(transparent)]
    Execution(Box<dyn Error + Send + Sync>),
    #[error("An internal error that likely indicates towards a bug: {0}")]
    Internal(String),
}

impl ActorError {
    /// Creates a result with an [ActorError::NotApplicable].
    pub fn not_applicable<T>(
        actor: impl Into<String>,
        reason: impl Into<String>,
    ) -> ActorResult<T> {
        Err(Self::NotApplicable {
            actor: actor.into(),
            reason: reason.into(),
        })
    }

    /// Creates a result with an [ActorError::ContractViolation].
    pub fn contract_violation<T>(cause: impl Into<String>) -> ActorResult<T> {
        Err(Self::ContractViolation(cause.into()))
    }

    /// Creates a result with an [ActorError::Internal].
    pub fn internal<T>(cause: impl Into<String>) -> ActorResult<T> {
        Err(Self::Internal(cause.into()))
    }

    /// Wraps an arbitrary error that occurred while running an actor.
    pub fn execution(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Execution(error.into())
    }

    /// Returns whether this error only states that an actor is not applicable.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }
}
