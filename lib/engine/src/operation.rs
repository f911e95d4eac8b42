use rdf_actors_model::{GraphNamePattern, GraphPattern, QuadPattern, Term, Variable};
use std::fmt::{Debug, Display, Formatter};

/// The tag of a [QueryOperation]. Typed actors are registered for exactly one tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationType {
    Construct,
    Project,
    Values,
    Pattern,
}

impl Display for OperationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationType::Construct => "construct",
            OperationType::Project => "project",
            OperationType::Values => "values",
            OperationType::Pattern => "pattern",
        };
        f.write_str(name)
    }
}

/// A node of a query algebra tree.
///
/// Operations are created once per query and are not modified during the evaluation. Actors
/// that rewrite an operation create a new tree.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOperation {
    /// Instantiates a template for every solution of the input.
    Construct(ConstructOperation),
    /// Restricts the solutions of the input to a set of variables.
    Project(ProjectOperation),
    /// A fixed table of solutions.
    Values(ValuesOperation),
    /// Any other graph pattern. These are evaluated by actors that are registered by the
    /// application.
    Pattern(GraphPattern),
}

impl QueryOperation {
    pub fn construct(template: Vec<QuadPattern>, input: QueryOperation) -> Self {
        Self::Construct(ConstructOperation {
            template,
            input: Box::new(input),
        })
    }

    pub fn project(input: QueryOperation, variables: Vec<Variable>) -> Self {
        Self::Project(ProjectOperation {
            input: Box::new(input),
            variables,
        })
    }

    pub fn values(variables: Vec<Variable>, rows: Vec<Vec<Option<Term>>>) -> Self {
        Self::Values(ValuesOperation { variables, rows })
    }

    /// Returns the tag of this operation.
    pub fn operation_type(&self) -> OperationType {
        match self {
            QueryOperation::Construct(_) => OperationType::Construct,
            QueryOperation::Project(_) => OperationType::Project,
            QueryOperation::Values(_) => OperationType::Values,
            QueryOperation::Pattern(_) => OperationType::Pattern,
        }
    }

    fn fmt_indented(&self, f: &mut Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        match self {
            QueryOperation::Construct(construct) => {
                f.write_str("Construct:")?;
                for (idx, pattern) in construct.template.iter().enumerate() {
                    f.write_str(if idx == 0 { " " } else { " . " })?;
                    fmt_quad_pattern(f, pattern)?;
                }
                writeln!(f)?;
                construct.input.fmt_indented(f, depth + 1)
            }
            QueryOperation::Project(project) => {
                f.write_str("Project:")?;
                for variable in &project.variables {
                    write!(f, " {variable}")?;
                }
                writeln!(f)?;
                project.input.fmt_indented(f, depth + 1)
            }
            QueryOperation::Values(values) => {
                f.write_str("Values:")?;
                for variable in &values.variables {
                    write!(f, " {variable}")?;
                }
                write!(f, " ({} rows)", values.rows.len())
            }
            QueryOperation::Pattern(pattern) => write!(f, "Pattern: {pattern}"),
        }
    }
}

impl Display for QueryOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}

fn fmt_quad_pattern(f: &mut Formatter<'_>, pattern: &QuadPattern) -> std::fmt::Result {
    write!(f, "{} {} {}", pattern.subject, pattern.predicate, pattern.object)?;
    match &pattern.graph_name {
        GraphNamePattern::NamedNode(graph) => write!(f, " {graph}"),
        GraphNamePattern::Variable(graph) => write!(f, " {graph}"),
        GraphNamePattern::DefaultGraph => Ok(()),
    }
}

/// Access to the payload of one variant of [QueryOperation].
pub trait TypedOperation: Debug + Send + Sync + 'static {
    /// The tag of the variant.
    const TYPE: OperationType;

    /// Returns the payload if `operation` has the tag [TypedOperation::TYPE].
    fn from_operation(operation: &QueryOperation) -> Option<&Self>;
}

/// A CONSTRUCT operation.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstructOperation {
    /// The patterns that are instantiated for each solution.
    pub template: Vec<QuadPattern>,
    /// The operation that produces the solutions.
    pub input: Box<QueryOperation>,
}

impl TypedOperation for ConstructOperation {
    const TYPE: OperationType = OperationType::Construct;

    fn from_operation(operation: &QueryOperation) -> Option<&Self> {
        match operation {
            QueryOperation::Construct(construct) => Some(construct),
            _ => None,
        }
    }
}

/// A projection onto an ordered set of variables.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectOperation {
    pub input: Box<QueryOperation>,
    pub variables: Vec<Variable>,
}

impl TypedOperation for ProjectOperation {
    const TYPE: OperationType = OperationType::Project;

    fn from_operation(operation: &QueryOperation) -> Option<&Self> {
        match operation {
            QueryOperation::Project(project) => Some(project),
            _ => None,
        }
    }
}

/// An inline table of solutions. `None` marks an unbound variable.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuesOperation {
    pub variables: Vec<Variable>,
    pub rows: Vec<Vec<Option<Term>>>,
}

impl TypedOperation for ValuesOperation {
    const TYPE: OperationType = OperationType::Values;

    fn from_operation(operation: &QueryOperation) -> Option<&Self> {
        match operation {
            QueryOperation::Values(values) => Some(values),
            _ => None,
        }
    }
}
