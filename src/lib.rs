//! chatbucket — pick the endpoint and API key for a chat-completion model.
//!
//! Model ids are grouped into families, each family maps to a credential
//! bucket (`reverse`, `gpt4`, `gpt3`), and each bucket holds an endpoint plus
//! one or more keys in configuration. Resolving a model reads the bucket and
//! picks one of its keys at random.
//!
//! # Quick start
//!
//! ```no_run
//! use chatbucket::config::load_config;
//! use chatbucket::{new_chat_instance_from_model, InstanceProps};
//!
//! let config = load_config(None).unwrap();
//! let instance = new_chat_instance_from_model(&config, &InstanceProps::new("gpt-4", false));
//! println!("{} {:?}", instance.endpoint(), instance.headers());
//! ```

pub mod config;
pub mod error;
pub mod instance;
pub mod keys;
pub mod model;
pub mod resolver;
pub mod store;
#[cfg(test)]
pub mod testsupport;

pub use instance::{ChatInstance, InstanceProps};
pub use model::{resolve_bucket, Bucket, ModelFamily};
pub use resolver::{new_chat_instance_from_model, CredentialResolver};
pub use store::{ConfigStore, MemoryStore};
