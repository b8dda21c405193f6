//! CLI entry point for chatbucket.

mod cli;

use chatbucket::config::{
    env_var_name, initialize_default_global_config, load_config_with_diagnostics,
    GlobalConfigInitResult, LoadedConfig, DEFAULT_LOG_FILTER,
};
use chatbucket::keys::{mask_key, split_keys};
use chatbucket::model::{resolve_bucket, routed_models, Bucket};
use chatbucket::{ChatInstance, CredentialResolver, InstanceProps};
use clap::Parser;
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::Args::parse();

    match args.command {
        cli::Command::Init { force } => {
            init_tracing(args.verbose, None);
            run_init(force);
        }
        cli::Command::Resolve {
            model,
            reversible,
            json,
            show_key,
        } => {
            let loaded = load_or_exit(args.config.as_deref(), args.verbose);
            let props = InstanceProps::new(model, reversible);
            run_resolve(&loaded, &props, json, show_key);
        }
        cli::Command::Buckets => {
            let loaded = load_or_exit(args.config.as_deref(), args.verbose);
            run_buckets(&loaded);
        }
    }
}

/// Load config, install logging from it, and surface diagnostics.
fn load_or_exit(path_override: Option<&str>, verbose: bool) -> LoadedConfig {
    let loaded = match load_config_with_diagnostics(path_override) {
        Ok(loaded) => loaded,
        Err(e) => {
            init_tracing(verbose, None);
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(verbose, loaded.config.log.filter.as_deref());
    for warning in &loaded.diagnostics.warnings {
        warn!("{warning}");
    }
    loaded
}

/// Install the global subscriber: `-v` > `RUST_LOG` > `[log].filter` > default.
fn init_tracing(verbose: bool, config_filter: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_resolve(loaded: &LoadedConfig, props: &InstanceProps, json: bool, show_key: bool) {
    let bucket = resolve_bucket(&props.model, props.reversible);
    let instance = CredentialResolver::new(&loaded.config).from_model(props);
    let shown_key = display_key(&instance, show_key);
    let mut headers = instance.headers();
    headers.insert("Authorization".to_string(), format!("Bearer {shown_key}"));

    if json {
        let out = json!({
            "model": props.model,
            "reversible": props.reversible,
            "bucket": bucket.as_str(),
            "endpoint": instance.endpoint(),
            "api_key": shown_key,
            "headers": headers,
        });
        println!("{out:#}");
        return;
    }

    println!("bucket:   {bucket}");
    println!("endpoint: {}", instance.endpoint());
    println!("api key:  {shown_key}");
    println!("headers:");
    for (name, value) in &headers {
        println!("  {name}: {value}");
    }
}

fn display_key(instance: &ChatInstance, show_key: bool) -> String {
    if show_key {
        instance.api_key().to_string()
    } else {
        mask_key(instance.api_key())
    }
}

fn run_buckets(loaded: &LoadedConfig) {
    match &loaded.source_path {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: built-in defaults"),
    }
    for bucket in Bucket::ALL {
        let (endpoint, keys) = loaded
            .config
            .bucket(bucket)
            .map(|b| (b.endpoint.as_str(), split_keys(&b.apikey).len()))
            .unwrap_or(("", 0));
        let endpoint = if endpoint.is_empty() {
            "<unset>"
        } else {
            endpoint
        };
        println!();
        println!("[{bucket}] {endpoint} ({keys} key(s))");
        println!(
            "  env: {}, {}",
            env_var_name(bucket, "endpoint"),
            env_var_name(bucket, "apikey")
        );
        println!("  models: {}", routed_models(bucket).join(", "));
    }
    println!();
    println!("unrecognized models use [{}]", resolve_bucket("", false));
}

fn run_init(force: bool) {
    match initialize_default_global_config(force) {
        Ok(GlobalConfigInitResult::Created { path }) => {
            println!("created {}", path.display());
        }
        Ok(GlobalConfigInitResult::AlreadyInitialized { path }) => {
            println!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            );
        }
        Ok(GlobalConfigInitResult::Overwritten { path, backup_path }) => {
            println!(
                "overwrote {} (backup: {})",
                path.display(),
                backup_path.display()
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
