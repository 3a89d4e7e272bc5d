//! Insertion-ordered scenario results.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Scenario name to result, in order of first insertion.
///
/// Re-inserting a name overwrites its result in place; other entries are
/// never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResults<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ScenarioResults<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ScenarioResults<T> {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a result, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, result: T) -> Option<T> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, result)),
            None => {
                self.entries.push((name, result));
                None
            }
        }
    }

    /// Result for a scenario.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Returns true if a result is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Scenario names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, result)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Number of stored scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for ScenarioResults<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}
