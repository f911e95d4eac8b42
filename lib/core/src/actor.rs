use crate::{ActionKind, ActorResult};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// A reference-counted pointer to an actor for the action kind `K`.
pub type ActorRef<K> = Arc<dyn Actor<K>>;

/// A named unit that can handle actions of the kind `K`.
///
/// Handling an action happens in two phases:
/// 1. [Actor::test] checks whether the actor can handle the action. It must not have any side
///    effects and should be cheap. If the actor cannot handle the action, the test fails with a
///    reason (usually [ActorError::NotApplicable](crate::ActorError::NotApplicable)).
/// 2. [Actor::run] handles the action. It is only called after a successful test for the same
///    action. A failure of `run` is a genuine failure and is reported to the caller.
///
/// Actors are immutable after construction and are shared between all evaluations.
#[async_trait]
pub trait Actor<K: ActionKind>: Debug + Send + Sync {
    /// The name of the actor. Used for logging and error messages.
    fn name(&self) -> &str;

    /// Checks whether this actor can handle `action`.
    async fn test(&self, action: &K::Action) -> ActorResult<K::Test>;

    /// Handles `action`.
    ///
    /// Calling this method for an action whose test did not succeed is a programming error.
    async fn run(&self, action: &K::Action) -> ActorResult<K::Output>;
}
