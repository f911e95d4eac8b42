mod bus;
mod equality;
mod numeric;
mod score;

pub use bus::{ExpectedValues, ScoreAction, ScoreKind, ScoreMediatorRef, ScoreOutput, ScoreTest};
pub use equality::EqualityScoreActor;
pub use numeric::NumericDistanceScoreActor;
pub use score::{rank, RdfScore, ScoreError, ScoreVector};
