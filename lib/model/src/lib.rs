mod context;
mod metadata;
mod template;

pub use context::{ActionContext, ContextValue};
pub use metadata::{Metadata, MetadataError, TreeProperties, TreeRelation};
pub use template::{pattern_variables, template_variables};

// Re-export some oxrdf types.
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeRef, GraphName, GraphNameRef, Literal, LiteralRef, NamedNode,
    NamedNodeRef, Quad, QuadRef, Subject, Term, TermRef, Variable, VariableRef,
};

// Re-export the numeric types that are used for interpreting literals.
pub use oxsdatatypes::{Decimal, Double, Float, Integer};

// Re-export the pattern types of spargebra. A template is a list of quad patterns.
pub use spargebra::algebra::GraphPattern;
pub use spargebra::term::{GraphNamePattern, NamedNodePattern, QuadPattern, TermPattern};

/// A single solution of a query. Maps variables to the terms they are bound to.
///
/// This is an alias for the [`QuerySolution`](sparesults::QuerySolution) of sparesults, which
/// is immutable and keeps its variables in a fixed order.
pub type BindingSet = sparesults::QuerySolution;
