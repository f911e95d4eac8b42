use crate::operation::QueryOperation;
use crate::results::{BindingsStream, QuadStream};
use futures::future::BoxFuture;
use rdf_actors_core::{ActionKind, ActorError, ActorResult, MediatorRef};
use rdf_actors_model::{ActionContext, Metadata, Variable};
use std::fmt::{Display, Formatter};

/// The kind of actions that evaluate a [QueryOperation].
#[derive(Debug)]
pub struct QueryOperationKind;

impl ActionKind for QueryOperationKind {
    type Action = QueryOperationAction;
    type Test = ();
    type Output = QueryOperationOutput;

    const NAME: &'static str = "query-operation";
}

/// A mediator that evaluates arbitrary query operations.
pub type QueryOperationMediatorRef = MediatorRef<QueryOperationKind>;

/// The request to evaluate an operation.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOperationAction {
    /// The operation to evaluate.
    pub operation: QueryOperation,
    /// Passed to all sub-evaluations unmodified.
    pub context: ActionContext,
}

impl QueryOperationAction {
    pub fn new(operation: QueryOperation, context: ActionContext) -> Self {
        Self { operation, context }
    }
}

/// A lazily computed [Metadata]. Nothing is computed until the future is polled.
pub type MetadataFuture = BoxFuture<'static, ActorResult<Metadata>>;

/// The kind of results that an operation produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    Bindings,
    Quads,
}

impl Display for OutputType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::Bindings => f.write_str("bindings"),
            OutputType::Quads => f.write_str("quads"),
        }
    }
}

/// The result of evaluating a [QueryOperation].
pub enum QueryOperationOutput {
    /// A stream of solutions.
    Bindings(BindingsOutput),
    /// A stream of quads.
    Quads(QuadsOutput),
}

impl QueryOperationOutput {
    pub fn output_type(&self) -> OutputType {
        match self {
            QueryOperationOutput::Bindings(_) => OutputType::Bindings,
            QueryOperationOutput::Quads(_) => OutputType::Quads,
        }
    }

    /// The variables that the solutions of the output may bind.
    ///
    /// Quad outputs never expose any variables.
    pub fn variables(&self) -> &[Variable] {
        match self {
            QueryOperationOutput::Bindings(bindings) => &bindings.variables,
            QueryOperationOutput::Quads(_) => &[],
        }
    }

    /// Returns the bindings of this output.
    ///
    /// # Errors
    ///
    /// Returns an [ActorError::ContractViolation] if this output is not a bindings output.
    pub fn into_bindings(self) -> ActorResult<BindingsOutput> {
        match self {
            QueryOperationOutput::Bindings(bindings) => Ok(bindings),
            other => invalid_output_type(OutputType::Bindings, other.output_type()),
        }
    }

    /// Returns the quads of this output.
    ///
    /// # Errors
    ///
    /// Returns an [ActorError::ContractViolation] if this output is not a quads output.
    pub fn into_quads(self) -> ActorResult<QuadsOutput> {
        match self {
            QueryOperationOutput::Quads(quads) => Ok(quads),
            other => invalid_output_type(OutputType::Quads, other.output_type()),
        }
    }
}

fn invalid_output_type<T>(expected: OutputType, actual: OutputType) -> ActorResult<T> {
    ActorError::contract_violation(format!(
        "Invalid query output type: Expected '{expected}' but got '{actual}'"
    ))
}

/// A stream of solutions together with its metadata.
pub struct BindingsOutput {
    pub stream: BindingsStream,
    /// `None` if the producer does not know anything about its results.
    pub metadata: Option<MetadataFuture>,
    /// The variables that the solutions may bind.
    pub variables: Vec<Variable>,
}

/// A stream of quads together with its metadata.
pub struct QuadsOutput {
    pub stream: QuadStream,
    pub metadata: Option<MetadataFuture>,
}
