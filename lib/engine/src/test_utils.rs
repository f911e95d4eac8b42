use crate::output::{
    BindingsOutput, MetadataFuture, QueryOperationAction, QueryOperationKind,
    QueryOperationMediatorRef, QueryOperationOutput,
};
use crate::results::BindingsStream;
use async_trait::async_trait;
use futures::FutureExt;
use rdf_actors_core::{Actor, ActorRef, ActorResult, Bus, MediatorFirst};
use rdf_actors_model::{BindingSet, Metadata, NamedNode, Term, Variable};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

type Respond = dyn Fn(&QueryOperationAction) -> ActorResult<QueryOperationOutput> + Send + Sync;

/// An actor that accepts every operation, records the actions it is run on, and answers with a
/// fixed response.
pub struct RecordingActor {
    respond: Box<Respond>,
    runs: Mutex<Vec<QueryOperationAction>>,
}

impl RecordingActor {
    pub fn new(
        respond: impl Fn(&QueryOperationAction) -> ActorResult<QueryOperationOutput>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            runs: Mutex::new(Vec::new()),
        }
    }

    /// Returns the actions that this actor was run on.
    pub fn runs(&self) -> Vec<QueryOperationAction> {
        self.runs.lock().map(|runs| runs.clone()).unwrap_or_default()
    }
}

impl Debug for RecordingActor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingActor").finish_non_exhaustive()
    }
}

#[async_trait]
impl Actor<QueryOperationKind> for RecordingActor {
    fn name(&self) -> &str {
        "recording"
    }

    async fn test(&self, _action: &QueryOperationAction) -> ActorResult<()> {
        Ok(())
    }

    async fn run(&self, action: &QueryOperationAction) -> ActorResult<QueryOperationOutput> {
        if let Ok(mut runs) = self.runs.lock() {
            runs.push(action.clone());
        }
        (self.respond)(action)
    }
}

/// Creates a first-applicable mediator over a bus with the given actors.
pub fn mediator(actors: Vec<ActorRef<QueryOperationKind>>) -> QueryOperationMediatorRef {
    let bus = Arc::new(Bus::new("bus-query-operation"));
    for actor in actors {
        bus.subscribe(actor);
    }
    Arc::new(MediatorFirst::new("mediator-query-operation", bus))
}

pub fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

pub fn iri(value: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{value}"))
}

/// Creates a solution that binds every variable to the term at the same position.
pub fn solution(bindings: Vec<(&str, Option<Term>)>) -> BindingSet {
    let (variables, values): (Vec<Variable>, Vec<Option<Term>>) = bindings
        .into_iter()
        .map(|(name, term)| (var(name), term))
        .unzip();
    BindingSet::from((Arc::<[Variable]>::from(variables), values))
}

pub fn ready_metadata(metadata: Metadata) -> MetadataFuture {
    futures::future::ready(Ok(metadata)).boxed()
}

/// Creates a bindings output over the given solutions.
pub fn bindings_output(
    variables: Vec<Variable>,
    solutions: Vec<BindingSet>,
    metadata: Option<Metadata>,
) -> QueryOperationOutput {
    QueryOperationOutput::Bindings(BindingsOutput {
        stream: BindingsStream::from_bindings(solutions),
        metadata: metadata.map(ready_metadata),
        variables,
    })
}
