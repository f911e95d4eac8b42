mod combine;
mod first;

pub use combine::{CombinableOutput, MediatorCombine};
pub use first::MediatorFirst;

use crate::{ActionKind, ActorResult, Bus};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// A reference-counted pointer to a mediator for the action kind `K`.
///
/// Actors that need to delegate work to other actors hold such a reference. It is injected when
/// the actor is created.
pub type MediatorRef<K> = Arc<dyn Mediator<K>>;

/// A policy that turns the test outcomes of the actors on a [Bus] into a single output.
///
/// The mediator publishes an action on its bus, decides which of the actors that passed their
/// test are run, runs them, and returns one output to the caller. The selection logic lives
/// exclusively in the mediator; actors never know about each other.
#[async_trait]
pub trait Mediator<K: ActionKind>: Debug + Send + Sync {
    /// The name of the mediator.
    fn name(&self) -> &str;

    /// The bus on which this mediator publishes its actions.
    fn bus(&self) -> &Arc<Bus<K>>;

    /// Handles `action` with the actors of the bus.
    async fn mediate(&self, action: &K::Action) -> ActorResult<K::Output>;
}
