//! Resolved endpoint/key pair handed to the HTTP layer.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::InstanceError;
use crate::keys::mask_key;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Resolution input: the requested model id and whether the alternate
/// `reverse` bucket may serve GPT-4 family requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstanceProps {
    pub model: String,
    pub reversible: bool,
}

impl InstanceProps {
    pub fn new(model: impl Into<String>, reversible: bool) -> Self {
        Self {
            model: model.into(),
            reversible,
        }
    }
}

/// Endpoint and API key drawn from one bucket.
///
/// Values are not validated: an empty endpoint or key is carried as-is and
/// surfaces as a failure wherever the instance is eventually used.
#[derive(Clone, PartialEq, Eq)]
pub struct ChatInstance {
    endpoint: String,
    api_key: String,
}

impl ChatInstance {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Request headers for a chat-completion call.
    ///
    /// Always exactly `Content-Type: application/json` and
    /// `Authorization: Bearer <api_key>`, built fresh on each call.
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                CONTENT_TYPE_HEADER.to_string(),
                JSON_CONTENT_TYPE.to_string(),
            ),
            (AUTHORIZATION_HEADER.to_string(), self.bearer()),
        ])
    }

    /// Same headers as [`ChatInstance::headers`], typed for `reqwest`.
    ///
    /// The authorization value is marked sensitive so it is redacted from
    /// `reqwest`'s debug output.
    pub fn header_map(&self) -> Result<HeaderMap, InstanceError> {
        let mut auth = HeaderValue::from_str(&self.bearer())
            .map_err(|_| InstanceError::InvalidHeader(AUTHORIZATION_HEADER))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

// Keys must never reach logs through `{:?}`.
impl fmt::Debug for ChatInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatInstance")
            .field("endpoint", &self.endpoint)
            .field("api_key", &mask_key(&self.api_key))
            .finish()
    }
}
