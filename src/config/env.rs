//! Environment overrides.
//!
//! `CHATBUCKET_<BUCKET>_ENDPOINT` and `CHATBUCKET_<BUCKET>_APIKEY` replace
//! the file values of a known bucket.

use crate::model::Bucket;

use super::defaults::ENV_PREFIX;
use super::resolve::normalized_string;
use super::{Config, ConfigDiagnostics};

pub(super) fn apply_runtime_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    for bucket in Bucket::ALL {
        if let Some(endpoint) = env_lookup(&env_var_name(bucket, "ENDPOINT"))
            .as_deref()
            .and_then(normalized_string)
        {
            config.bucket_mut(bucket).endpoint = endpoint;
        }
        if let Some(apikey) = env_lookup(&env_var_name(bucket, "APIKEY")) {
            config.bucket_mut(bucket).apikey = apikey;
        }
    }
}

/// Environment variable overriding `field` of `bucket`.
pub fn env_var_name(bucket: Bucket, field: &str) -> String {
    format!(
        "{ENV_PREFIX}_{}_{}",
        bucket.as_str().to_ascii_uppercase(),
        field.to_ascii_uppercase()
    )
}

/// Sort and deduplicate diagnostic strings for stable output.
pub(super) fn dedupe_diagnostics(diagnostics: &mut ConfigDiagnostics) {
    diagnostics.warnings.sort();
    diagnostics.warnings.dedup();
}
