//! Global config location and `chatbucket init`.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ConfigError;
use crate::model::{routed_models, Bucket};

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_FILTER};
use super::env::env_var_name;
use super::GlobalConfigInitResult;

const OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// `$XDG_CONFIG_HOME`, or `~/.config` when unset or empty.
pub fn config_root_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// `<config root>/chatbucket/chatbucket.toml`.
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Write a starter config with one table per bucket to the global path.
///
/// An existing file is left alone unless `force` is set, in which case it is
/// copied to `<name>.bak` first.
pub fn initialize_default_global_config(
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let path = default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("no home directory to place chatbucket.toml in".to_string())
    })?;
    initialize_default_global_config_at_path(&path, force)
}

pub(super) fn initialize_default_global_config_at_path(
    path: &Path,
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = render_default_config();

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(text.as_bytes())?;
            info!(path = %path.display(), "created config");
            Ok(GlobalConfigInitResult::Created {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists && !force => {
            Ok(GlobalConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let mut backup = path.as_os_str().to_owned();
            backup.push(".bak");
            let backup_path = PathBuf::from(backup);
            std::fs::copy(path, &backup_path)?;
            std::fs::write(path, text)?;
            info!(path = %path.display(), backup = %backup_path.display(), "replaced config");
            Ok(GlobalConfigInitResult::Overwritten {
                path: path.to_path_buf(),
                backup_path,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Starter config text. Each bucket table is preceded by the model ids routed
/// to it and the env vars that override it.
pub(super) fn render_default_config() -> String {
    let mut out = String::from(
        "# chatbucket configuration.\n\
         #\n\
         # `apikey` may hold several keys separated by `|`; one is picked at\n\
         # random for every request. Unlisted model ids use [openai.gpt3].\n",
    );
    for bucket in Bucket::ALL {
        let endpoint = match bucket {
            Bucket::Reverse => "",
            Bucket::Gpt4 | Bucket::Gpt3 => OPENAI_ENDPOINT,
        };
        let _ = writeln!(out);
        for model in routed_models(bucket) {
            let _ = writeln!(out, "#   {model}");
        }
        let _ = writeln!(
            out,
            "# env: {}, {}",
            env_var_name(bucket, "endpoint"),
            env_var_name(bucket, "apikey")
        );
        let _ = writeln!(out, "[openai.{bucket}]");
        let _ = writeln!(out, "endpoint = \"{endpoint}\"");
        let _ = writeln!(out, "apikey = \"\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[log]");
    let _ = writeln!(out, "# RUST_LOG and -v take precedence.");
    let _ = writeln!(out, "filter = \"{DEFAULT_LOG_FILTER}\"");
    out
}
