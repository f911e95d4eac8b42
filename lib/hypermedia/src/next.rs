use crate::bus::{LinksAction, LinksKind, LinksOutput};
use async_trait::async_trait;
use rdf_actors_core::{Actor, ActorError, ActorResult};

/// Only follows the `next` link of a page.
#[derive(Debug)]
pub struct NextLinksActor {
    name: String,
}

impl NextLinksActor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Actor<LinksKind> for NextLinksActor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, action: &LinksAction) -> ActorResult<()> {
        if action.metadata.next.is_none() {
            return ActorError::not_applicable(
                &self.name,
                "Actor requires a next link in the metadata",
            );
        }
        Ok(())
    }

    async fn run(&self, action: &LinksAction) -> ActorResult<LinksOutput> {
        Ok(LinksOutput::new(action.metadata.next.iter().cloned().collect()))
    }
}
