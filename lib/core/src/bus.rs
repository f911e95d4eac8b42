use crate::{ActionKind, ActorRef, ActorResult};
use futures::future::join_all;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

/// The outcome of testing a single actor.
pub struct TestOutcome<K: ActionKind> {
    /// The tested actor.
    pub actor: ActorRef<K>,
    /// The result of the test.
    pub result: ActorResult<K::Test>,
}

impl<K: ActionKind> TestOutcome<K> {
    /// Returns whether the test succeeded and the actor may be run.
    pub fn is_applicable(&self) -> bool {
        self.result.as_ref().is_ok_and(K::is_applicable)
    }
}

impl<K: ActionKind> Debug for TestOutcome<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestOutcome")
            .field("actor", &self.actor.name())
            .field("result", &self.result)
            .finish()
    }
}

/// A registry of the actors that are interested in one kind of action.
///
/// The bus keeps its actors in insertion order. This order is observable, as mediators use it
/// to break ties. Consumers never use a bus directly but go through a
/// [Mediator](crate::Mediator).
pub struct Bus<K: ActionKind> {
    /// The name of the bus.
    name: String,
    /// The subscribed actors in insertion order.
    actors: RwLock<Vec<ActorRef<K>>>,
}

impl<K: ActionKind> Bus<K> {
    /// Creates an empty [Bus] with the given `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actors: RwLock::new(Vec::new()),
        }
    }

    /// The name of the bus.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends `actor` to the actors of this bus.
    pub fn subscribe(&self, actor: ActorRef<K>) {
        tracing::debug!(bus = %self.name, actor = actor.name(), "Subscribing actor");
        self.actors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(actor);
    }

    /// Removes `actor` from this bus. Returns whether the actor was subscribed.
    pub fn unsubscribe(&self, actor: &ActorRef<K>) -> bool {
        let mut actors = self.actors.write().unwrap_or_else(PoisonError::into_inner);
        let len_before = actors.len();
        actors.retain(|subscribed| !Arc::ptr_eq(subscribed, actor));
        len_before != actors.len()
    }

    /// Returns the subscribed actors in insertion order.
    pub fn actors(&self) -> Vec<ActorRef<K>> {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.actors.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tests all subscribed actors on `action`.
    ///
    /// The tests are issued concurrently. Every outcome is collected, including failures, and
    /// the outcomes are returned in the order of the actors on the bus.
    pub async fn publish(&self, action: &K::Action) -> Vec<TestOutcome<K>> {
        let actors = self.actors();
        tracing::trace!(bus = %self.name, actors = actors.len(), "Publishing action");

        let results = join_all(actors.iter().map(|actor| actor.test(action))).await;
        actors
            .into_iter()
            .zip(results)
            .map(|(actor, result)| TestOutcome { actor, result })
            .collect()
    }
}

impl<K: ActionKind> Debug for Bus<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let actors = self.actors();
        f.debug_struct("Bus")
            .field("name", &self.name)
            .field(
                "actors",
                &actors.iter().map(|actor| actor.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
