//! Keyed string lookup consumed by the resolver.
//!
//! Paths have the shape `openai.<bucket>.endpoint` and
//! `openai.<bucket>.apikey`. [`crate::config::Config`] implements this over a
//! loaded toml file; [`MemoryStore`] is a flat map for embedding and tests.

use std::collections::BTreeMap;

/// Read-only source of configuration strings.
pub trait ConfigStore {
    /// Value stored at `path`, or `None` when unset.
    fn get_string(&self, path: &str) -> Option<String>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn get_string(&self, path: &str) -> Option<String> {
        (**self).get_string(path)
    }
}

/// Flat path-to-value map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one path, replacing any previous value.
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(path.into(), value.into());
        self
    }

    /// Builder-style `set`.
    pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(path, value);
        self
    }
}

impl ConfigStore for MemoryStore {
    fn get_string(&self, path: &str) -> Option<String> {
        self.values.get(path).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
