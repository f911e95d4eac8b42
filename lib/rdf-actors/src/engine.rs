use crate::config::EngineConfig;
use crate::error::EngineError;
use rdf_actors_core::{ActorRef, Bus, MediatorCombine, MediatorFirst};
use rdf_actors_engine::{
    ConstructHandler, ProjectHandler, QueryOperation, QueryOperationAction, QueryOperationKind,
    QueryOperationMediatorRef, QueryOperationOutput, TypedOperationHandler, ValuesHandler,
};
use rdf_actors_hypermedia::{LinksAction, LinksKind, LinksMediatorRef, TreeAllLinksActor};
use rdf_actors_model::{ActionContext, Metadata};
use rdf_actors_score::{
    EqualityScoreActor, NumericDistanceScoreActor, ScoreAction, ScoreKind, ScoreMediatorRef,
    ScoreVector,
};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Creates an actor for the query operation bus. The factory receives the mediator of the bus
/// such that the actor can evaluate sub-operations.
pub type QueryOperationActorFactory =
    Box<dyn FnOnce(QueryOperationMediatorRef) -> ActorRef<QueryOperationKind> + Send>;

/// Wires the buses, mediators and actors of a [QueryEngine].
///
/// The built-in actors (if enabled in the [EngineConfig]) are subscribed first. The actors that
/// are added to the builder are subscribed afterwards, in the order in which they were added.
pub struct EngineBuilder {
    config: EngineConfig,
    operation_actors: Vec<QueryOperationActorFactory>,
    link_actors: Vec<ActorRef<LinksKind>>,
    score_actors: Vec<ActorRef<ScoreKind>>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            operation_actors: Vec::new(),
            link_actors: Vec::new(),
            score_actors: Vec::new(),
        }
    }

    /// Adds an actor to the query operation bus.
    #[must_use]
    pub fn with_operation_actor(
        mut self,
        factory: impl FnOnce(QueryOperationMediatorRef) -> ActorRef<QueryOperationKind>
            + Send
            + 'static,
    ) -> Self {
        self.operation_actors.push(Box::new(factory));
        self
    }

    /// Adds an actor to the hypermedia links bus.
    #[must_use]
    pub fn with_link_actor(mut self, actor: ActorRef<LinksKind>) -> Self {
        self.link_actors.push(actor);
        self
    }

    /// Adds an actor to the scoring bus.
    #[must_use]
    pub fn with_score_actor(mut self, actor: ActorRef<ScoreKind>) -> Self {
        self.score_actors.push(actor);
        self
    }

    pub fn build(self) -> QueryEngine {
        let config = self.config;

        let operation_bus =
            Arc::new(Bus::<QueryOperationKind>::new(config.query_operation_bus()));
        let query_operation: QueryOperationMediatorRef = Arc::new(MediatorFirst::new(
            "mediator-query-operation",
            Arc::clone(&operation_bus),
        ));
        let links_bus = Arc::new(Bus::<LinksKind>::new(config.links_bus()));
        let links: LinksMediatorRef = Arc::new(MediatorFirst::new(
            "mediator-rdf-resolve-hypermedia-links",
            Arc::clone(&links_bus),
        ));
        let score_bus = Arc::new(Bus::<ScoreKind>::new(config.score_bus()));
        let score: ScoreMediatorRef = Arc::new(MediatorCombine::new(
            "mediator-rdf-score",
            Arc::clone(&score_bus),
        ));

        if config.builtin_actors() {
            operation_bus.subscribe(Arc::new(
                ConstructHandler::new(Arc::clone(&query_operation))
                    .into_actor("actor-query-operation-construct"),
            ));
            operation_bus.subscribe(Arc::new(
                ProjectHandler::new(Arc::clone(&query_operation))
                    .into_actor("actor-query-operation-project"),
            ));
            operation_bus.subscribe(Arc::new(
                ValuesHandler::new().into_actor("actor-query-operation-values"),
            ));
            links_bus.subscribe(Arc::new(TreeAllLinksActor::new(
                "actor-rdf-resolve-hypermedia-links-tree-all",
            )));
            score_bus.subscribe(Arc::new(EqualityScoreActor::new("actor-rdf-score-equality")));
            score_bus.subscribe(Arc::new(NumericDistanceScoreActor::new(
                "actor-rdf-score-numeric-distance",
            )));
        }

        for factory in self.operation_actors {
            operation_bus.subscribe(factory(Arc::clone(&query_operation)));
        }
        for actor in self.link_actors {
            links_bus.subscribe(actor);
        }
        for actor in self.score_actors {
            score_bus.subscribe(actor);
        }

        tracing::debug!(
            operation_actors = operation_bus.len(),
            link_actors = links_bus.len(),
            score_actors = score_bus.len(),
            "Built query engine"
        );
        QueryEngine {
            config,
            query_operation,
            links,
            score,
        }
    }
}

impl Debug for EngineBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .field("operation_actors", &self.operation_actors.len())
            .field("link_actors", &self.link_actors)
            .field("score_actors", &self.score_actors)
            .finish()
    }
}

/// The entry point for evaluating query operations, discovering hypermedia links and scoring
/// statements.
///
/// The engine is meant to live as long as the process. Actors that evaluate sub-operations hold
/// the mediator of their own bus, so the buses are never freed.
#[derive(Debug)]
pub struct QueryEngine {
    config: EngineConfig,
    query_operation: QueryOperationMediatorRef,
    links: LinksMediatorRef,
    score: ScoreMediatorRef,
}

impl QueryEngine {
    /// Creates an engine with the built-in actors and the default configuration.
    pub fn new() -> Self {
        Self::builder(EngineConfig::default()).build()
    }

    pub fn builder(config: EngineConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The mediator that dispatches query operations to their actors.
    pub fn query_operation_mediator(&self) -> &QueryOperationMediatorRef {
        &self.query_operation
    }

    /// Evaluates `operation` with the default context.
    pub async fn query(
        &self,
        operation: QueryOperation,
    ) -> Result<QueryOperationOutput, EngineError> {
        self.query_with_context(operation, ActionContext::new()).await
    }

    /// Evaluates `operation`. `context` is merged with the default context of the engine.
    pub async fn query_with_context(
        &self,
        operation: QueryOperation,
        context: ActionContext,
    ) -> Result<QueryOperationOutput, EngineError> {
        tracing::debug!(%operation, "Evaluating query operation");
        let context = context.merge(self.config.default_context());
        self.query_operation
            .mediate(&QueryOperationAction::new(operation, context))
            .await
            .map_err(EngineError::Query)
    }

    /// Returns the URLs that should be followed from a page with the given `metadata`.
    pub async fn extract_links(&self, metadata: Metadata) -> Result<Vec<String>, EngineError> {
        let action =
            LinksAction::new(metadata).with_context(self.config.default_context().clone());
        let output = self
            .links
            .mediate(&action)
            .await
            .map_err(EngineError::Links)?;
        Ok(output.urls)
    }

    /// Scores a statement with all scoring actors. The result has one component per actor.
    pub async fn score(&self, action: ScoreAction) -> Result<ScoreVector, EngineError> {
        let context = action.context.merge(self.config.default_context());
        let action = action.with_context(context);
        let output = self
            .score
            .mediate(&action)
            .await
            .map_err(EngineError::Score)?;
        Ok(output.into_vector())
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}
