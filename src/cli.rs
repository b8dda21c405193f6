//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Resolve the endpoint and API key used for a chat-completion model.
#[derive(Debug, Parser)]
#[command(name = "chatbucket", version)]
pub struct Args {
    /// Path to config file (default: ./chatbucket.toml or ~/.config/chatbucket/chatbucket.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Log resolution details (same as RUST_LOG=debug).
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a model id to its bucket, endpoint, and key.
    Resolve {
        /// Model id, e.g. `gpt-4-0613`.
        model: String,

        /// Allow the `reverse` bucket for GPT-4 family models.
        #[arg(short = 'r', long = "reversible")]
        reversible: bool,

        /// Print a JSON object instead of text.
        #[arg(long = "json")]
        json: bool,

        /// Print the API key unmasked.
        #[arg(long = "show-key")]
        show_key: bool,
    },
    /// List known buckets with their endpoint and key count.
    Buckets,
    /// Write the default config to ~/.config/chatbucket/chatbucket.toml.
    Init {
        /// Overwrite an existing file after backing it up.
        #[arg(long = "force")]
        force: bool,
    },
}
