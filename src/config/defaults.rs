//! Default configuration constants.

/// Config file name, both in the working directory and the global config dir.
pub(super) const CONFIG_FILE_NAME: &str = "chatbucket.toml";
/// Directory under the config root holding the global config file.
pub(super) const CONFIG_DIR_NAME: &str = "chatbucket";
/// Prefix of per-bucket environment overrides.
pub(super) const ENV_PREFIX: &str = "CHATBUCKET";
/// Log filter used when neither `RUST_LOG` nor `[log].filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";
