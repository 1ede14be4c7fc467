//! # Configuration Sink
//!
//! The mutable key/value store the resolution engine writes into. The engine
//! also reads the sink once before writing, so placeholder values already
//! present in lower-priority layers can be rewritten without the engine ever
//! observing its own output.

/// Write side (and snapshot read side) of the layered configuration store.
///
/// Last writer wins for a given key, matching the override semantics of a
/// layered configuration builder.
pub trait ConfigurationSink {
    /// Set a configuration key to a resolved value.
    fn set(&mut self, key: &str, value: &str);

    /// Enumerate the current key/value pairs.
    ///
    /// The engine snapshots this exactly once, before its first write.
    fn entries(&self) -> Vec<(String, String)>;
}

/// In-memory configuration store.
///
/// Backed by a `BTreeMap` so enumeration order is deterministic, which keeps
/// placeholder scanning reproducible across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfig {
    values: std::collections::BTreeMap<String, String>,
}

impl MemoryConfig {
    /// Create an empty configuration store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of keys currently set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigurationSink for MemoryConfig {
    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl FromIterator<(String, String)> for MemoryConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
