//! Shock sets and named scenarios.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered mapping of shock key to fractional shock.
///
/// A key names either a ticker or an asset class; a shock of `-0.10`
/// multiplies the targeted values by `0.9`. Keys keep their first insertion
/// position; setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShockSet {
    entries: Vec<(String, f64)>,
}

impl ShockSet {
    /// Creates an empty shock set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same shock on every key.
    #[must_use]
    pub fn uniform<I, S>(keys: I, shock: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().map(|k| (k, shock)).collect()
    }

    /// Sets a shock, replacing any existing value for the key.
    pub fn set(&mut self, key: impl Into<String>, shock: f64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = shock,
            None => self.entries.push((key, shock)),
        }
    }

    /// Builder form of [`ShockSet::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, shock: f64) -> Self {
        self.set(key, shock);
        self
    }

    /// Shock for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| *s)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), *s))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no shocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ShockSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, shock) in iter {
            set.set(key, shock);
        }
        set
    }
}

impl Serialize for ShockSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, shock) in &self.entries {
            map.serialize_entry(key, shock)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ShockSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ShockSetVisitor;

        impl<'de> Visitor<'de> for ShockSetVisitor {
            type Value = ShockSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ticker or asset class to shock")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ShockSet, A::Error> {
                let mut set = ShockSet::new();
                while let Some((key, shock)) = access.next_entry::<String, f64>()? {
                    set.set(key, shock);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(ShockSetVisitor)
    }
}

/// A named set of shocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name; results are stored under it.
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shocks by ticker or asset class.
    pub shocks: ShockSet,
}

impl Scenario {
    /// Creates a scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, shocks: ShockSet) -> Self {
        Self {
            name: name.into(),
            description: None,
            shocks,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}
