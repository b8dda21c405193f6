//! Configuration data model.
//!
//! Struct definitions only; loading and source precedence live in the
//! sibling modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::model::Bucket;
use crate::store::ConfigStore;

/// Endpoint and candidate keys stored under `[openai.<bucket>]`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BucketConfig {
    pub endpoint: String,
    /// One key, or several separated by `|`.
    #[serde(alias = "api_key")]
    pub apikey: String,
}

/// Logging preferences.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, e.g. `"info"` or
    /// `"chatbucket=debug"`.
    pub filter: Option<String>,
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Buckets keyed by normalized (trimmed, lowercase) name.
    pub openai: BTreeMap<String, BucketConfig>,
    pub log: LogConfig,
}

impl Config {
    /// Settings for a known bucket, when configured.
    pub fn bucket(&self, bucket: Bucket) -> Option<&BucketConfig> {
        self.openai.get(bucket.as_str())
    }

    /// Mutable settings for a known bucket, inserting an empty entry.
    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut BucketConfig {
        self.openai.entry(bucket.as_str().to_string()).or_default()
    }
}

impl ConfigStore for Config {
    fn get_string(&self, path: &str) -> Option<String> {
        let mut parts = path.splitn(3, '.');
        let (Some("openai"), Some(name), Some(field)) = (parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        let bucket = self.openai.get(name)?;
        match field {
            "endpoint" => Some(bucket.endpoint.clone()),
            "apikey" => Some(bucket.apikey.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) openai: BTreeMap<String, BucketConfig>,
    pub(super) log: LogConfig,
}

/// Diagnostics captured while resolving runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigDiagnostics {
    /// Non-fatal problems, e.g. a bucket with no endpoint.
    pub warnings: Vec<String>,
}

/// Configuration payload plus load-time diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub diagnostics: ConfigDiagnostics,
    /// File the config was read from; `None` for built-in defaults.
    pub source_path: Option<PathBuf>,
}

/// Result of explicit global config initialization (`chatbucket init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created {
        path: PathBuf,
    },
    AlreadyInitialized {
        path: PathBuf,
    },
    Overwritten {
        path: PathBuf,
        backup_path: PathBuf,
    },
}
