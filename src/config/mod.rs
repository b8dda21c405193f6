//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables `CHATBUCKET_<BUCKET>_ENDPOINT` and
//!    `CHATBUCKET_<BUCKET>_APIKEY`.
//! 2. TOML file given via `--config`.
//! 3. `./chatbucket.toml` in the current directory.
//! 4. `$XDG_CONFIG_HOME/chatbucket/chatbucket.toml` (or
//!    `~/.config/chatbucket/chatbucket.toml`).
//! 5. Built-in defaults (no buckets).

mod defaults;
mod env;
mod init;
mod loader;
mod resolve;
mod sources;
mod types;

pub use defaults::DEFAULT_LOG_FILTER;
pub use env::env_var_name;
pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use loader::{load_config, load_config_with_diagnostics};
pub use types::{
    BucketConfig, Config, ConfigDiagnostics, GlobalConfigInitResult, LoadedConfig, LogConfig,
};

use types::FileConfig;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::init::{initialize_default_global_config_at_path, render_default_config};
    use super::loader::load_config_with_diagnostics_from_sources;
    use super::resolve::resolve_config_from_file_config;
    use super::*;
    use crate::error::ConfigError;
    use crate::model::Bucket;
    use crate::store::ConfigStore;
    use crate::testsupport::TestTempDir;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_have_no_buckets() {
        let c = Config::default();
        assert!(c.openai.is_empty());
        assert!(c.log.filter.is_none());
        assert_eq!(c.get_string("openai.gpt4.endpoint"), None);
    }

    #[test]
    fn parse_bucket_tables() {
        let toml = r#"
            [openai.gpt4]
            endpoint = "https://api.example.com"
            apikey = "secret"

            [openai.gpt3]
            endpoint = "  https://cheap.example.com  "
            api_key = "a|b"

            [log]
            filter = "debug"
        "#;
        let c = parse_file_config_for_test(toml).unwrap();
        assert_eq!(
            c.get_string("openai.gpt4.endpoint").as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(c.get_string("openai.gpt4.apikey").as_deref(), Some("secret"));
        assert_eq!(c.bucket(Bucket::Gpt3).unwrap().endpoint, "https://cheap.example.com");
        assert_eq!(c.bucket(Bucket::Gpt3).unwrap().apikey, "a|b");
        assert_eq!(c.log.filter.as_deref(), Some("debug"));
    }

    #[test]
    fn store_lookup_rejects_malformed_paths() {
        let c = parse_file_config_for_test(
            r#"
            [openai.gpt4]
            endpoint = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(c.get_string("openai.gpt4"), None);
        assert_eq!(c.get_string("openai.gpt4.model"), None);
        assert_eq!(c.get_string("anthropic.gpt4.endpoint"), None);
        // Missing field inside a configured bucket reads as empty.
        assert_eq!(c.get_string("openai.gpt4.apikey").as_deref(), Some(""));
    }

    #[test]
    fn bucket_names_are_normalized() {
        let c = parse_file_config_for_test(
            r#"
            [openai.GPT4]
            endpoint = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert!(c.bucket(Bucket::Gpt4).is_some());
    }

    #[test]
    fn duplicate_bucket_after_normalization_is_rejected() {
        let err = parse_file_config_for_test(
            r#"
            [openai.gpt4]
            endpoint = "https://a.example"

            [openai.GPT4]
            endpoint = "https://b.example"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("more than once")));
    }

    #[test]
    fn blank_bucket_name_is_rejected() {
        let err = parse_file_config_for_test(
            r#"
            [openai." "]
            endpoint = "https://a.example"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn parse_empty_string() {
        let c = parse_file_config_for_test("").unwrap();
        assert!(c.openai.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_toml_error() {
        let err = parse_file_config_for_test("[openai.gpt4\nendpoint = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn rendered_default_config_parses_with_every_bucket() {
        let text = render_default_config();
        let c = parse_file_config_for_test(&text).unwrap();
        for bucket in Bucket::ALL {
            assert!(c.bucket(bucket).is_some(), "{bucket}");
        }
        assert_eq!(c.bucket(Bucket::Reverse).unwrap().endpoint, "");
        assert_eq!(
            c.bucket(Bucket::Gpt4).unwrap().endpoint,
            "https://api.openai.com"
        );
        assert_eq!(c.log.filter.as_deref(), Some(DEFAULT_LOG_FILTER));
    }

    #[test]
    fn rendered_default_config_lists_models_above_their_bucket() {
        let text = render_default_config();
        let reverse = text.find("\n[openai.reverse]\n").unwrap();
        let gpt4 = text.find("\n[openai.gpt4]\n").unwrap();
        let gpt3 = text.find("\n[openai.gpt3]\n").unwrap();
        let listed = |model: &str| text.find(&format!("#   {model}\n")).unwrap();

        assert!(listed("gpt-4-0613 (reversible)") < reverse);
        assert!((reverse..gpt4).contains(&listed("gpt-4-32k")));
        assert!((reverse..gpt4).contains(&listed("gpt-4 (not reversible)")));
        assert!((gpt4..gpt3).contains(&listed("gpt-3.5-turbo-16k")));
        assert_eq!(text.matches("#   gpt-4-32k\n").count(), 1);
        assert!(text.contains("# env: CHATBUCKET_GPT3_ENDPOINT, CHATBUCKET_GPT3_APIKEY"));
    }

    #[test]
    fn env_var_names_use_uppercase_bucket() {
        assert_eq!(env_var_name(Bucket::Gpt4, "endpoint"), "CHATBUCKET_GPT4_ENDPOINT");
        assert_eq!(env_var_name(Bucket::Reverse, "apikey"), "CHATBUCKET_REVERSE_APIKEY");
    }

    #[test]
    fn initialize_global_config_creates_template() {
        let tmp = TestTempDir::new("config-init");
        let path = tmp.child("chatbucket/chatbucket.toml");

        let outcome = initialize_default_global_config_at_path(&path, false).unwrap();
        assert_eq!(outcome, GlobalConfigInitResult::Created { path: path.clone() });
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_default_config());
    }

    #[test]
    fn initialize_global_config_returns_already_initialized_without_force() {
        let tmp = TestTempDir::new("config-init-existing");
        let path = tmp.write_text("chatbucket/chatbucket.toml", "old-config");

        let outcome = initialize_default_global_config_at_path(&path, false).unwrap();
        assert!(matches!(
            outcome,
            GlobalConfigInitResult::AlreadyInitialized { path: ref p } if p == &path
        ));
        let current = std::fs::read_to_string(&path).unwrap();
        assert_eq!(current, "old-config");
    }

    #[test]
    fn initialize_global_config_force_overwrites_and_creates_backup() {
        let tmp = TestTempDir::new("config-init-force");
        let path = tmp.write_text("chatbucket/chatbucket.toml", "old-config");

        let outcome = initialize_default_global_config_at_path(&path, true).unwrap();
        let backup_path = match outcome {
            GlobalConfigInitResult::Overwritten {
                path: returned_path,
                backup_path,
            } => {
                assert_eq!(returned_path, path);
                backup_path
            }
            other => panic!("unexpected outcome: {other:?}"),
        };

        let current = std::fs::read_to_string(&path).unwrap();
        assert_eq!(current, render_default_config());
        let backup = std::fs::read_to_string(&backup_path).unwrap();
        assert_eq!(backup, "old-config");
        assert_eq!(backup_path, tmp.child("chatbucket/chatbucket.toml.bak"));
    }

    #[test]
    fn explicit_path_is_loaded_and_reported() {
        let tmp = TestTempDir::new("config-explicit");
        let path = tmp.write_text(
            "custom.toml",
            r#"
            [openai.gpt4]
            endpoint = "https://explicit.example"
            apikey = "k"
            "#,
        );

        let loaded = load_config_with_diagnostics(Some(path.to_string_lossy().as_ref())).unwrap();
        assert_eq!(loaded.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            loaded.config.bucket(Bucket::Gpt4).unwrap().endpoint,
            "https://explicit.example"
        );
    }

    #[test]
    fn missing_explicit_path_is_an_io_error() {
        let tmp = TestTempDir::new("config-missing");
        let path = tmp.child("nope.toml");
        let err = load_config(Some(path.to_string_lossy().as_ref())).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn injected_sources_prefer_local_file_over_global() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "chatbucket.toml".to_string(),
            r#"
            [openai.gpt3]
            endpoint = "https://local.example"
            "#
            .to_string(),
        );
        files.insert(
            "/cfg/chatbucket/chatbucket.toml".to_string(),
            r#"
            [openai.gpt3]
            endpoint = "https://global.example"
            "#
            .to_string(),
        );

        let loaded = load_config_with_sources_for_test(
            None,
            files,
            BTreeMap::new(),
            Some(PathBuf::from("/cfg")),
        )
        .unwrap();

        assert_eq!(
            loaded.config.bucket(Bucket::Gpt3).unwrap().endpoint,
            "https://local.example"
        );
        assert_eq!(loaded.source_path, Some(PathBuf::from("chatbucket.toml")));
    }

    #[test]
    fn injected_sources_fall_back_to_global_then_defaults() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "/cfg/chatbucket/chatbucket.toml".to_string(),
            r#"
            [openai.gpt3]
            endpoint = "https://global.example"
            "#
            .to_string(),
        );
        let loaded = load_config_with_sources_for_test(
            None,
            files,
            BTreeMap::new(),
            Some(PathBuf::from("/cfg")),
        )
        .unwrap();
        assert_eq!(
            loaded.source_path,
            Some(PathBuf::from("/cfg/chatbucket/chatbucket.toml"))
        );

        let loaded =
            load_config_with_sources_for_test(None, BTreeMap::new(), BTreeMap::new(), None)
                .unwrap();
        assert!(loaded.source_path.is_none());
        assert!(loaded.config.openai.is_empty());
    }

    #[test]
    fn injected_sources_apply_env_overrides() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "chatbucket.toml".to_string(),
            r#"
            [openai.gpt4]
            endpoint = "https://file.example"
            apikey = "file-key"
            "#
            .to_string(),
        );

        let mut env = BTreeMap::<String, String>::new();
        env.insert(
            "CHATBUCKET_GPT4_ENDPOINT".to_string(),
            "https://override.example".to_string(),
        );
        env.insert("CHATBUCKET_REVERSE_APIKEY".to_string(), "r1|r2".to_string());

        let loaded =
            load_config_with_sources_for_test(None, files, env, Some(PathBuf::from("/cfg")))
                .unwrap();

        let gpt4 = loaded.config.bucket(Bucket::Gpt4).unwrap();
        assert_eq!(gpt4.endpoint, "https://override.example");
        assert_eq!(gpt4.apikey, "file-key");
        assert_eq!(loaded.config.bucket(Bucket::Reverse).unwrap().apikey, "r1|r2");
    }

    #[test]
    fn diagnostics_flag_incomplete_and_unknown_buckets() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "chatbucket.toml".to_string(),
            r#"
            [openai.gpt4]
            endpoint = "https://api.example.com"
            apikey = "k"

            [openai.gpt3]
            apikey = " | "

            [openai.claude]
            endpoint = "https://elsewhere.example"
            "#
            .to_string(),
        );
        let loaded =
            load_config_with_sources_for_test(None, files, BTreeMap::new(), None).unwrap();
        let warnings = &loaded.diagnostics.warnings;

        assert!(warnings.iter().any(|w| w.contains("`reverse` is not configured")));
        assert!(warnings.iter().any(|w| w.contains("`gpt3` has no endpoint")));
        assert!(warnings.iter().any(|w| w.contains("`gpt3` has no api keys")));
        assert!(warnings.iter().any(|w| w.contains("[openai.claude]")));
        assert!(!warnings.iter().any(|w| w.contains("`gpt4`")));
        let mut sorted = warnings.clone();
        sorted.sort();
        assert_eq!(&sorted, warnings);
    }

    fn load_config_with_sources_for_test(
        path_override: Option<&str>,
        files: BTreeMap<String, String>,
        env: BTreeMap<String, String>,
        config_root: Option<PathBuf>,
    ) -> Result<LoadedConfig, ConfigError> {
        load_config_with_diagnostics_from_sources(
            path_override,
            move |path| {
                let key = path.to_string_lossy().into_owned();
                files
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, key))
            },
            move |name| env.get(name).cloned(),
            move || config_root.clone(),
        )
    }

    fn parse_file_config_for_test(toml_text: &str) -> Result<Config, ConfigError> {
        let parsed: FileConfig = toml::from_str(toml_text)?;
        let mut diagnostics = ConfigDiagnostics::default();
        resolve_config_from_file_config(parsed, &mut diagnostics)
    }
}
