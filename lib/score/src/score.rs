use std::cmp::Ordering;

/// An error raised while creating a score.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("A score must be within [0, 1] but got {0}")]
    OutOfRange(f64),
}

/// The score of a statement.
///
/// 1 is the best possible score and 0 the worst admissible one. An inadmissible statement has
/// no score and is excluded from all orderings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RdfScore {
    Score(f64),
    Inadmissible,
}

impl RdfScore {
    pub const BEST: RdfScore = RdfScore::Score(1.0);
    pub const WORST: RdfScore = RdfScore::Score(0.0);

    /// Creates an admissible score.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not within [0, 1]. This includes NaN.
    pub fn new(value: f64) -> Result<Self, ScoreError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self::Score(value))
        } else {
            Err(ScoreError::OutOfRange(value))
        }
    }

    /// Returns the value of an admissible score.
    pub fn value(self) -> Option<f64> {
        match self {
            RdfScore::Score(value) => Some(value),
            RdfScore::Inadmissible => None,
        }
    }

    pub fn is_admissible(self) -> bool {
        matches!(self, RdfScore::Score(_))
    }
}

impl From<bool> for RdfScore {
    fn from(value: bool) -> Self {
        if value {
            Self::BEST
        } else {
            Self::WORST
        }
    }
}

/// A vector of scores, usually produced by several scoring actors for the same statement.
///
/// Vectors are ordered lexicographically: `(a, b) <= (a', b')` iff `a < a'` or
/// (`a = a'` and `b <= b'`). Vectors of different lengths and vectors with an inadmissible
/// component are not comparable at all, not even with themselves.
#[derive(Debug, Clone, Default)]
pub struct ScoreVector(Vec<RdfScore>);

impl ScoreVector {
    pub fn new(scores: Vec<RdfScore>) -> Self {
        Self(scores)
    }

    pub fn scores(&self) -> &[RdfScore] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether no component is inadmissible.
    pub fn is_admissible(&self) -> bool {
        self.0.iter().all(|score| score.is_admissible())
    }

    /// Compares two vectors lexicographically. Returns `None` if the vectors are incomparable.
    pub fn compare(&self, other: &ScoreVector) -> Option<Ordering> {
        if self.len() != other.len() || !self.is_admissible() || !other.is_admissible() {
            return None;
        }

        for (lhs, rhs) in self.0.iter().zip(&other.0) {
            match lhs.value()?.partial_cmp(&rhs.value()?)? {
                Ordering::Equal => continue,
                ordering => return Some(ordering),
            }
        }
        Some(Ordering::Equal)
    }
}

impl PartialEq for ScoreVector {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for ScoreVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl From<Vec<RdfScore>> for ScoreVector {
    fn from(scores: Vec<RdfScore>) -> Self {
        Self(scores)
    }
}

/// Orders `items` by descending score and drops all items with an inadmissible score.
///
/// Vectors of different lengths are incomparable, so items are only ranked against items with
/// a vector of the same length. Each such group is ranked on its own and the groups follow each
/// other in the order of their first item. Items with equal scores keep their relative order.
pub fn rank<T>(items: impl IntoIterator<Item = (T, ScoreVector)>) -> Vec<(T, ScoreVector)> {
    let mut groups: Vec<Vec<(T, ScoreVector)>> = Vec::new();
    for (item, score) in items {
        // Also drops vectors with a NaN component.
        if score.compare(&score).is_none() {
            continue;
        }
        let group = groups
            .iter_mut()
            .find(|group| group.first().is_some_and(|(_, first)| first.len() == score.len()));
        match group {
            Some(group) => group.push((item, score)),
            None => groups.push(vec![(item, score)]),
        }
    }

    groups
        .into_iter()
        .flat_map(|mut group| {
            group.sort_by(|(_, lhs), (_, rhs)| rhs.compare(lhs).unwrap_or(Ordering::Equal));
            group
        })
        .collect()
}
