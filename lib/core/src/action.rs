use std::fmt::Debug;

/// Describes one kind of action that is published on a [Bus](crate::Bus).
///
/// Each kind of action defines the types that flow through the two phases of an actor:
/// - [ActionKind::Action] is the input of both phases.
/// - [ActionKind::Test] is the result of a successful test. It may carry information that a
///   mediator uses for its decision.
/// - [ActionKind::Output] is the result of running an actor.
///
/// Implementors are usually zero-sized marker types.
pub trait ActionKind: Send + Sync + 'static {
    /// The input of an actor.
    type Action: Debug + Send + Sync;
    /// The result of a successful test.
    type Test: Debug + Send;
    /// The result of running an actor.
    type Output: Send;

    /// A human-readable name of the action kind. Used in error messages.
    const NAME: &'static str;

    /// Returns whether a successful test result allows running the actor.
    ///
    /// Some kinds report suitability as part of their test result instead of failing the test.
    /// Mediators treat a test result for which this returns `false` like a failed test.
    fn is_applicable(_test: &Self::Test) -> bool {
        true
    }
}
