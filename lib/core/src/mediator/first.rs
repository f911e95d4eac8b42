use crate::bus::TestOutcome;
use crate::{ActionKind, ActorError, ActorRef, ActorResult, Bus, Mediator};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A mediator that runs the first actor whose test succeeded.
///
/// "First" refers to the order of the actors on the bus, not to the order in which the tests
/// complete. If no test succeeds, mediation fails with [ActorError::Unhandled].
pub struct MediatorFirst<K: ActionKind> {
    name: String,
    bus: Arc<Bus<K>>,
}

impl<K: ActionKind> MediatorFirst<K> {
    /// Creates a new [MediatorFirst] that publishes actions on `bus`.
    pub fn new(name: impl Into<String>, bus: Arc<Bus<K>>) -> Self {
        Self {
            name: name.into(),
            bus,
        }
    }

    /// Selects the actor that would run `action` without running it.
    pub async fn mediate_actor(&self, action: &K::Action) -> ActorResult<ActorRef<K>> {
        let outcomes = self.bus.publish(action).await;

        let mut reasons = Vec::new();
        for TestOutcome { actor, result } in outcomes {
            match result {
                Ok(test) if K::is_applicable(&test) => {
                    tracing::debug!(
                        mediator = %self.name,
                        actor = actor.name(),
                        "Selected actor"
                    );
                    return Ok(actor);
                }
                Ok(test) => {
                    tracing::debug!(
                        mediator = %self.name,
                        actor = actor.name(),
                        ?test,
                        "Actor is not suitable"
                    );
                    reasons.push(format!("Actor {} is not suitable.", actor.name()));
                }
                Err(error) => {
                    tracing::debug!(
                        mediator = %self.name,
                        actor = actor.name(),
                        %error,
                        "Actor rejected action"
                    );
                    reasons.push(error.to_string());
                }
            }
        }

        let reasons = if reasons.is_empty() {
            String::from("The bus has no actors.")
        } else {
            reasons.join(" ")
        };
        tracing::debug!(mediator = %self.name, kind = K::NAME, "No actor could handle action");
        Err(ActorError::Unhandled {
            bus: self.bus.name().to_owned(),
            kind: K::NAME,
            reasons,
        })
    }
}

#[async_trait]
impl<K: ActionKind> Mediator<K> for MediatorFirst<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn bus(&self) -> &Arc<Bus<K>> {
        &self.bus
    }

    async fn mediate(&self, action: &K::Action) -> ActorResult<K::Output> {
        let actor = self.mediate_actor(action).await?;
        actor.run(action).await
    }
}

impl<K: ActionKind> Debug for MediatorFirst<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediatorFirst")
            .field("name", &self.name)
            .field("bus", &self.bus)
            .finish()
    }
}
