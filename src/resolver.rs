//! Model-to-credential resolution.
//!
//! Every call re-reads the store and re-picks a key; nothing is cached, so
//! repeated resolutions of one bucket spread across its configured keys.

use tracing::{debug, warn};

use crate::instance::{ChatInstance, InstanceProps};
use crate::keys::{split_keys, KeyPicker, RandomKeyPicker};
use crate::model::{resolve_bucket, Bucket, ModelFamily};
use crate::store::ConfigStore;

/// Builds [`ChatInstance`]s from a config store.
#[derive(Debug, Clone)]
pub struct CredentialResolver<S, P = RandomKeyPicker> {
    store: S,
    picker: P,
}

impl<S: ConfigStore> CredentialResolver<S> {
    /// Resolver picking keys uniformly at random.
    pub fn new(store: S) -> Self {
        Self {
            store,
            picker: RandomKeyPicker,
        }
    }
}

impl<S: ConfigStore, P: KeyPicker> CredentialResolver<S, P> {
    pub fn with_picker(store: S, picker: P) -> Self {
        Self { store, picker }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the bucket for `props` and load an instance from it.
    pub fn from_model(&self, props: &InstanceProps) -> ChatInstance {
        let bucket = resolve_bucket(&props.model, props.reversible);
        if ModelFamily::from_model_id(&props.model) == ModelFamily::Other {
            debug!(model = %props.model, %bucket, "unrecognized model id, using fallback bucket");
        } else {
            debug!(model = %props.model, reversible = props.reversible, %bucket, "resolved bucket");
        }
        self.load_from_bucket(bucket)
    }

    /// Read `bucket`'s endpoint and keys and pick one key.
    ///
    /// Missing values become empty strings.
    pub fn load_from_bucket(&self, bucket: Bucket) -> ChatInstance {
        let endpoint = self
            .store
            .get_string(&bucket.endpoint_path())
            .unwrap_or_default();
        let candidates = self
            .store
            .get_string(&bucket.apikey_path())
            .map(|raw| split_keys(&raw))
            .unwrap_or_default();

        if endpoint.is_empty() {
            warn!(%bucket, "bucket has no endpoint configured");
        }
        let api_key = match self.picker.pick(&candidates) {
            Some(key) => key.to_string(),
            None => {
                warn!(%bucket, "bucket has no api keys configured");
                String::new()
            }
        };
        debug!(%bucket, %endpoint, candidates = candidates.len(), "loaded bucket credentials");

        ChatInstance::new(endpoint, api_key)
    }
}

/// One-shot resolution with the default random key picker.
pub fn new_chat_instance_from_model<S: ConfigStore>(
    store: &S,
    props: &InstanceProps,
) -> ChatInstance {
    CredentialResolver::new(store).from_model(props)
}
