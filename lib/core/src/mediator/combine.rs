use crate::{ActionKind, ActorRef, ActorResult, Bus, Mediator};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// An output that can be merged with the outputs of other actors of the same bus.
pub trait CombinableOutput: Sized {
    /// The output that takes the place of an actor that did not accept the action.
    fn neutral() -> Self;

    /// Merges `outputs` into a single output.
    ///
    /// `outputs` holds one output per actor on the bus, in the order of the actors on the bus.
    /// It is empty if no actor is subscribed to the bus.
    fn combine(outputs: Vec<Self>) -> Self;
}

/// A mediator that runs every actor whose test succeeded and combines their outputs.
///
/// The accepted actors are run concurrently. Every other actor contributes
/// [CombinableOutput::neutral], so the combined output always has one part per actor on the
/// bus. The outputs are combined with [CombinableOutput::combine] in the order of the actors on
/// the bus. If any run fails, the mediation fails with that error.
pub struct MediatorCombine<K: ActionKind> {
    name: String,
    bus: Arc<Bus<K>>,
}

impl<K: ActionKind> MediatorCombine<K> {
    /// Creates a new [MediatorCombine] that publishes actions on `bus`.
    pub fn new(name: impl Into<String>, bus: Arc<Bus<K>>) -> Self {
        Self {
            name: name.into(),
            bus,
        }
    }
}

#[async_trait]
impl<K: ActionKind> Mediator<K> for MediatorCombine<K>
where
    K::Output: CombinableOutput,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn bus(&self) -> &Arc<Bus<K>> {
        &self.bus
    }

    async fn mediate(&self, action: &K::Action) -> ActorResult<K::Output> {
        let outcomes = self
            .bus
            .publish(action)
            .await
            .into_iter()
            .map(|outcome| {
                let applicable = outcome.is_applicable();
                if !applicable {
                    tracing::debug!(
                        mediator = %self.name,
                        actor = outcome.actor.name(),
                        "Actor does not contribute"
                    );
                }
                (outcome.actor, applicable)
            })
            .collect::<Vec<(ActorRef<K>, bool)>>();
        tracing::debug!(
            mediator = %self.name,
            actors = outcomes.len(),
            contributors = outcomes.iter().filter(|(_, applicable)| *applicable).count(),
            "Combining actor outputs"
        );

        let outputs = try_join_all(outcomes.iter().map(|(actor, applicable)| async move {
            if *applicable {
                actor.run(action).await
            } else {
                Ok(K::Output::neutral())
            }
        }))
        .await?;
        Ok(K::Output::combine(outputs))
    }
}

impl<K: ActionKind> Debug for MediatorCombine<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediatorCombine")
            .field("name", &self.name)
            .field("bus", &self.bus)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EchoActor, EchoKind};

    fn mediator(actors: Vec<Arc<EchoActor>>) -> MediatorCombine<EchoKind> {
        let bus = Arc::new(Bus::new("bus"));
        for actor in actors {
            bus.subscribe(actor);
        }
        MediatorCombine::new("mediator", bus)
    }

    #[tokio::test]
    async fn runs_all_applicable_actors() -> ActorResult<()> {
        let a = Arc::new(EchoActor::accepting("a"));
        let b = Arc::new(EchoActor::rejecting("b"));
        let c = Arc::new(EchoActor::accepting("c"));
        let mediator = mediator(vec![Arc::clone(&a), Arc::clone(&b), Arc::clone(&c)]);

        let output = mediator.mediate(&String::from("x")).await?;

        assert_eq!(output, "a: x | - | c: x");
        assert_eq!((a.runs(), b.runs(), c.runs()), (1, 0, 1));
        Ok(())
    }

    #[tokio::test]
    async fn no_applicable_actor_yields_neutral_output() -> ActorResult<()> {
        let mediator = mediator(vec![
            Arc::new(EchoActor::rejecting("a")),
            Arc::new(EchoActor::rejecting("b")),
        ]);

        let output = mediator.mediate(&String::from("x")).await?;

        assert_eq!(output, "- | -");
        Ok(())
    }

    #[tokio::test]
    async fn empty_bus_yields_empty_output() -> ActorResult<()> {
        let mediator = mediator(vec![]);

        let output = mediator.mediate(&String::from("x")).await?;

        assert_eq!(output, "");
        Ok(())
    }

    #[tokio::test]
    async fn run_failure_fails_mediation() {
        let mediator = mediator(vec![
            Arc::new(EchoActor::accepting("a")),
            Arc::new(EchoActor::failing("b")),
        ]);

        let result = mediator.mediate(&String::from("x")).await;

        assert!(result.is_err(), "Expected the failure of b");
    }
}
