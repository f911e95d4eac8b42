use crate::score::{RdfScore, ScoreVector};
use rdf_actors_core::{ActionKind, CombinableOutput, MediatorRef};
use rdf_actors_model::{ActionContext, Literal, Quad, Term, TermRef};
use rustc_hash::FxHashMap;

/// The kind of actions that score a single statement.
#[derive(Debug)]
pub struct ScoreKind;

impl ActionKind for ScoreKind {
    type Action = ScoreAction;
    type Test = ScoreTest;
    type Output = ScoreOutput;

    const NAME: &'static str = "rdf-score";

    fn is_applicable(test: &ScoreTest) -> bool {
        test.suitable
    }
}

/// A mediator that combines the scores of all scoring actors on the bus.
///
/// An actor that is not suitable for a statement contributes [RdfScore::BEST], as it places no
/// constraint on the statement. All statements scored on the same bus therefore get vectors of
/// the same length.
pub type ScoreMediatorRef = MediatorRef<ScoreKind>;

/// Maps URIs to the values that are expected for them.
pub type ExpectedValues = FxHashMap<String, Vec<Term>>;

/// The request to score a statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreAction {
    /// The statement to score.
    pub quad: Quad,
    /// The expected values of objects, keyed by predicate URI. Takes precedence over
    /// [ScoreAction::expected_datatype_values].
    pub expected_predicate_values: Option<ExpectedValues>,
    /// The expected values of literal objects, keyed by datatype URI.
    pub expected_datatype_values: Option<ExpectedValues>,
    /// A normalised value that is evaluated instead of the object of the statement.
    pub literal_value: Option<Literal>,
    pub context: ActionContext,
}

impl ScoreAction {
    pub fn new(quad: Quad) -> Self {
        Self {
            quad,
            expected_predicate_values: None,
            expected_datatype_values: None,
            literal_value: None,
            context: ActionContext::new(),
        }
    }

    #[must_use]
    pub fn with_expected_predicate_values(mut self, values: ExpectedValues) -> Self {
        self.expected_predicate_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_expected_datatype_values(mut self, values: ExpectedValues) -> Self {
        self.expected_datatype_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_literal_value(mut self, value: Literal) -> Self {
        self.literal_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: ActionContext) -> Self {
        self.context = context;
        self
    }

    /// Returns the value that scorers evaluate. This is the normalised literal value if one is
    /// given and the object of the statement otherwise.
    pub fn value(&self) -> TermRef<'_> {
        match &self.literal_value {
            Some(literal) => literal.as_ref().into(),
            None => self.quad.object.as_ref(),
        }
    }

    /// Returns the values that are expected for the statement.
    ///
    /// The values are looked up by the predicate of the statement. If there are none, and the
    /// object is a literal, they are looked up by the datatype of the object. Returns an empty
    /// slice if neither lookup yields any value.
    pub fn extract_expected_values(&self) -> &[Term] {
        let by_predicate = self
            .expected_predicate_values
            .as_ref()
            .and_then(|values| values.get(self.quad.predicate.as_str()))
            .filter(|values| !values.is_empty());
        if let Some(values) = by_predicate {
            return values;
        }

        let Term::Literal(literal) = &self.quad.object else {
            return &[];
        };
        self.expected_datatype_values
            .as_ref()
            .and_then(|values| values.get(literal.datatype().as_str()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Whether a scoring actor can score a statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreTest {
    pub suitable: bool,
}

impl ScoreTest {
    pub const SUITABLE: ScoreTest = ScoreTest { suitable: true };
    pub const UNSUITABLE: ScoreTest = ScoreTest { suitable: false };
}

/// The score of a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ScoreOutput {
    /// The score of a single actor.
    Single(RdfScore),
    /// The combined scores of several actors, in the order of the actors on the bus.
    Multiple(Vec<RdfScore>),
}

impl ScoreOutput {
    pub fn scores(&self) -> &[RdfScore] {
        match self {
            ScoreOutput::Single(score) => std::slice::from_ref(score),
            ScoreOutput::Multiple(scores) => scores,
        }
    }

    pub fn into_scores(self) -> Vec<RdfScore> {
        match self {
            ScoreOutput::Single(score) => vec![score],
            ScoreOutput::Multiple(scores) => scores,
        }
    }

    pub fn into_vector(self) -> ScoreVector {
        ScoreVector::new(self.into_scores())
    }
}

impl CombinableOutput for ScoreOutput {
    fn neutral() -> Self {
        ScoreOutput::Single(RdfScore::BEST)
    }

    fn combine(outputs: Vec<Self>) -> Self {
        ScoreOutput::Multiple(
            outputs
                .into_iter()
                .flat_map(ScoreOutput::into_scores)
                .collect(),
        )
    }
}
