//! Config-file to runtime-config resolution.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::keys::split_keys;
use crate::model::Bucket;

use super::{BucketConfig, Config, ConfigDiagnostics, FileConfig};

pub(super) fn resolve_config_from_file_config(
    parsed: FileConfig,
    diagnostics: &mut ConfigDiagnostics,
) -> Result<Config, ConfigError> {
    let mut openai = BTreeMap::<String, BucketConfig>::new();
    for (raw_name, bucket) in parsed.openai {
        let Some(name) = normalized_string(&raw_name).map(|n| n.to_ascii_lowercase()) else {
            return Err(ConfigError::Invalid(
                "bucket name under `[openai]` must not be empty".to_string(),
            ));
        };
        if name.parse::<Bucket>().is_err() {
            diagnostics.warnings.push(format!(
                "`[openai.{name}]` is not used by model resolution (known buckets: reverse, gpt4, gpt3)."
            ));
        }
        if openai.contains_key(&name) {
            return Err(ConfigError::Invalid(format!(
                "bucket `{name}` is configured more than once"
            )));
        }
        openai.insert(
            name,
            BucketConfig {
                endpoint: bucket.endpoint.trim().to_string(),
                apikey: bucket.apikey,
            },
        );
    }

    Ok(Config {
        openai,
        log: parsed.log,
    })
}

/// Record buckets that would resolve to empty endpoint or key values.
pub(super) fn collect_bucket_warnings(config: &Config, diagnostics: &mut ConfigDiagnostics) {
    for bucket in Bucket::ALL {
        let Some(settings) = config.bucket(bucket) else {
            diagnostics
                .warnings
                .push(format!("bucket `{bucket}` is not configured."));
            continue;
        };
        if settings.endpoint.is_empty() {
            diagnostics.warnings.push(format!(
                "bucket `{bucket}` has no endpoint; requests routed to it will fail."
            ));
        }
        if split_keys(&settings.apikey).is_empty() {
            diagnostics
                .warnings
                .push(format!("bucket `{bucket}` has no api keys."));
        }
    }
}

pub(super) fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
