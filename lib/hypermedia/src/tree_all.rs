use crate::bus::{LinksAction, LinksKind, LinksOutput};
use async_trait::async_trait;
use rdf_actors_core::{Actor, ActorError, ActorResult};

/// Follows the `next` link of a page or, if there is none, all relations of a
/// [TREE](https://w3id.org/tree/specification) node.
#[derive(Debug)]
pub struct TreeAllLinksActor {
    name: String,
}

impl TreeAllLinksActor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Actor<LinksKind> for TreeAllLinksActor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, action: &LinksAction) -> ActorResult<()> {
        if !action.metadata.has_links() {
            return ActorError::not_applicable(
                &self.name,
                "Actor requires a next link or tree relations in the metadata",
            );
        }
        Ok(())
    }

    async fn run(&self, action: &LinksAction) -> ActorResult<LinksOutput> {
        if let Some(next) = &action.metadata.next {
            return Ok(LinksOutput::new(vec![next.clone()]));
        }

        let urls = action
            .metadata
            .tree_relations()
            .map(|(_, relation)| relation.node.clone())
            .collect::<Vec<_>>();
        tracing::trace!(actor = %self.name, links = urls.len(), "Following tree relations");
        Ok(LinksOutput::new(urls))
    }
}
