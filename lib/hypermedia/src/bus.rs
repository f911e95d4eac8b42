use rdf_actors_core::{ActionKind, MediatorRef};
use rdf_actors_model::{ActionContext, Metadata};

/// The kind of actions that discover the links to follow from the metadata of a page.
#[derive(Debug)]
pub struct LinksKind;

impl ActionKind for LinksKind {
    type Action = LinksAction;
    type Test = ();
    type Output = LinksOutput;

    const NAME: &'static str = "rdf-resolve-hypermedia-links";
}

/// A mediator that selects a link actor for the given metadata.
pub type LinksMediatorRef = MediatorRef<LinksKind>;

/// The request to discover links.
#[derive(Clone, Debug, PartialEq)]
pub struct LinksAction {
    /// The metadata of the page whose links should be discovered.
    pub metadata: Metadata,
    pub context: ActionContext,
}

impl LinksAction {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            context: ActionContext::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: ActionContext) -> Self {
        self.context = context;
        self
    }
}

/// The discovered links.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinksOutput {
    /// The URLs to follow, in the order in which they should be followed.
    pub urls: Vec<String>,
}

impl LinksOutput {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}
