mod construct;
mod operation;
mod output;
mod project;
pub mod results;
#[cfg(test)]
mod test_utils;
mod transform;
mod typed;
mod values;

pub use construct::ConstructHandler;
pub use operation::{
    ConstructOperation, OperationType, ProjectOperation, QueryOperation, TypedOperation,
    ValuesOperation,
};
pub use output::{
    BindingsOutput, MetadataFuture, OutputType, QueryOperationAction, QueryOperationKind,
    QueryOperationMediatorRef, QueryOperationOutput, QuadsOutput,
};
pub use project::ProjectHandler;
pub use transform::{MultiTransformExt, MultiTransformStream};
pub use typed::{TypedOperationActor, TypedOperationHandler};
pub use values::ValuesHandler;
