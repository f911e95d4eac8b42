use rdf_actors_model::ActionContext;

/// Holds the configuration of a [QueryEngine](crate::QueryEngine).
///
/// The configuration is built with the `with_*` methods:
///
/// ```
/// use rdf_actors::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_default_context_entry("lenient", true)
///     .with_builtin_actors(false);
/// assert!(!config.builtin_actors());
/// ```
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Merged into the context of every action. Entries of the action take precedence.
    default_context: ActionContext,
    /// Whether the built-in actors are registered on the buses.
    builtin_actors: bool,
    query_operation_bus: String,
    links_bus: String,
    score_bus: String,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_context(&self) -> &ActionContext {
        &self.default_context
    }

    pub fn builtin_actors(&self) -> bool {
        self.builtin_actors
    }

    pub fn query_operation_bus(&self) -> &str {
        &self.query_operation_bus
    }

    pub fn links_bus(&self) -> &str {
        &self.links_bus
    }

    pub fn score_bus(&self) -> &str {
        &self.score_bus
    }

    /// Replaces the default context.
    #[must_use]
    pub fn with_default_context(mut self, context: ActionContext) -> Self {
        self.default_context = context;
        self
    }

    /// Adds a single entry to the default context.
    #[must_use]
    pub fn with_default_context_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<rdf_actors_model::ContextValue>,
    ) -> Self {
        self.default_context = self.default_context.with(key, value);
        self
    }

    /// Sets whether the built-in actors are registered. If disabled, the buses only contain the
    /// actors that are added to the [EngineBuilder](crate::EngineBuilder).
    #[must_use]
    pub fn with_builtin_actors(mut self, builtin_actors: bool) -> Self {
        self.builtin_actors = builtin_actors;
        self
    }

    #[must_use]
    pub fn with_query_operation_bus(mut self, name: impl Into<String>) -> Self {
        self.query_operation_bus = name.into();
        self
    }

    #[must_use]
    pub fn with_links_bus(mut self, name: impl Into<String>) -> Self {
        self.links_bus = name.into();
        self
    }

    #[must_use]
    pub fn with_score_bus(mut self, name: impl Into<String>) -> Self {
        self.score_bus = name.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_context: ActionContext::new(),
            builtin_actors: true,
            query_operation_bus: String::from("bus-query-operation"),
            links_bus: String::from("bus-rdf-resolve-hypermedia-links"),
            score_bus: String::from("bus-rdf-score"),
        }
    }
}
