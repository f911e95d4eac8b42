use serde_json::{Map, Value};
use std::sync::Arc;

/// A value stored in an [ActionContext].
pub type ContextValue = Value;

/// An opaque key-value bag that accompanies every action.
///
/// Actors pass the context through unmodified to whatever they call. The entries are shared
/// between clones; [`ActionContext::with`] copies them only if another clone still holds them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionContext {
    entries: Arc<Map<String, Value>>,
}

impl ActionContext {
    /// Creates an empty [ActionContext].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns whether an entry for `key` exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a context that additionally holds `value` for `key`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.entries).insert(key.into(), value.into());
        self
    }

    /// Returns a context that holds the entries of `self` and `other`. Entries of `self` take
    /// precedence.
    #[must_use]
    pub fn merge(&self, other: &ActionContext) -> Self {
        let mut entries = other.entries.as_ref().clone();
        for (key, value) in self.entries.iter() {
            entries.insert(key.clone(), value.clone());
        }
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for ActionContext {
    fn from(entries: Map<String, Value>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_does_not_modify_clones() {
        let base = ActionContext::new().with("a", 1);
        let extended = base.clone().with("b", 2);

        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.get("a"), Some(&json!(1)));
    }

    #[test]
    fn merge_prefers_own_entries() {
        let defaults = ActionContext::new().with("a", 1).with("b", 1);
        let context = ActionContext::new().with("a", 2);

        let merged = context.merge(&defaults);
        assert_eq!(merged.get("a"), Some(&json!(2)));
        assert_eq!(merged.get("b"), Some(&json!(1)));
    }
}
