use crate::bus::{ScoreAction, ScoreKind, ScoreOutput, ScoreTest};
use crate::score::RdfScore;
use async_trait::async_trait;
use rdf_actors_core::{Actor, ActorResult};

/// Scores a statement with 1 if its value equals one of the expected values and with 0
/// otherwise.
///
/// If no values are expected for the statement, it scores 1.
#[derive(Debug)]
pub struct EqualityScoreActor {
    name: String,
}

impl EqualityScoreActor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Actor<ScoreKind> for EqualityScoreActor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, _action: &ScoreAction) -> ActorResult<ScoreTest> {
        Ok(ScoreTest::SUITABLE)
    }

    async fn run(&self, action: &ScoreAction) -> ActorResult<ScoreOutput> {
        let expected = action.extract_expected_values();
        if expected.is_empty() {
            return Ok(ScoreOutput::Single(RdfScore::BEST));
        }

        let value = action.value();
        let matches = expected.iter().any(|term| term.as_ref() == value);
        Ok(ScoreOutput::Single(RdfScore::from(matches)))
    }
}
