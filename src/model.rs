//! Model families and the family-to-bucket mapping.
//!
//! A request names a concrete model id (`gpt-4-0613`, `gpt-3.5-turbo-16k`, ...).
//! Ids are grouped into a [`ModelFamily`] via a static table, and each family
//! maps to a credential [`Bucket`]. Anything not in the table is
//! [`ModelFamily::Other`] and lands in the `gpt3` bucket.

use std::fmt;
use std::str::FromStr;

pub const GPT4: &str = "gpt-4";
pub const GPT4_0314: &str = "gpt-4-0314";
pub const GPT4_0613: &str = "gpt-4-0613";
pub const GPT4_32K: &str = "gpt-4-32k";
pub const GPT4_32K_0314: &str = "gpt-4-32k-0314";
pub const GPT4_32K_0613: &str = "gpt-4-32k-0613";
pub const GPT3_TURBO_16K: &str = "gpt-3.5-turbo-16k";
pub const GPT3_TURBO_16K_0301: &str = "gpt-3.5-turbo-16k-0301";
pub const GPT3_TURBO_16K_0613: &str = "gpt-3.5-turbo-16k-0613";

/// Every recognized model id and the family it belongs to.
pub const MODEL_TABLE: &[(&str, ModelFamily)] = &[
    (GPT4, ModelFamily::Gpt4),
    (GPT4_0314, ModelFamily::Gpt4),
    (GPT4_0613, ModelFamily::Gpt4),
    (GPT4_32K, ModelFamily::Gpt4_32k),
    (GPT4_32K_0314, ModelFamily::Gpt4_32k),
    (GPT4_32K_0613, ModelFamily::Gpt4_32k),
    (GPT3_TURBO_16K, ModelFamily::Gpt35Turbo16k),
    (GPT3_TURBO_16K_0301, ModelFamily::Gpt35Turbo16k),
    (GPT3_TURBO_16K_0613, ModelFamily::Gpt35Turbo16k),
];

/// Group of model ids that share a credential bucket.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    Gpt4,
    Gpt4_32k,
    Gpt35Turbo16k,
    /// Unrecognized id.
    Other,
}

impl ModelFamily {
    /// Classify a model id. Only exact table ids are recognized; any other
    /// spelling, including case or whitespace variants, is `Other`.
    pub fn from_model_id(model: &str) -> Self {
        MODEL_TABLE
            .iter()
            .find(|(id, _)| *id == model)
            .map(|(_, family)| *family)
            .unwrap_or(Self::Other)
    }

    /// Bucket used by this family for a given `reversible` flag.
    pub fn bucket(self, reversible: bool) -> Bucket {
        match self {
            Self::Gpt4 if reversible => Bucket::Reverse,
            Self::Gpt4 => Bucket::Gpt4,
            Self::Gpt4_32k => Bucket::Gpt4,
            Self::Gpt35Turbo16k => Bucket::Gpt3,
            Self::Other => Bucket::Gpt3,
        }
    }
}

/// Named group of endpoint + key settings under `[openai.<bucket>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Reverse,
    Gpt4,
    Gpt3,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Reverse, Bucket::Gpt4, Bucket::Gpt3];

    /// Config key for this bucket.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reverse => "reverse",
            Self::Gpt4 => "gpt4",
            Self::Gpt3 => "gpt3",
        }
    }

    /// Store path of the endpoint value, e.g. `openai.gpt4.endpoint`.
    pub fn endpoint_path(self) -> String {
        format!("openai.{}.endpoint", self.as_str())
    }

    /// Store path of the `|`-delimited key list, e.g. `openai.gpt4.apikey`.
    pub fn apikey_path(self) -> String {
        format!("openai.{}.apikey", self.as_str())
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Bucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unknown bucket `{name}` (expected reverse, gpt4, or gpt3)"))
    }
}

/// Pick the credential bucket for a model id and `reversible` flag.
///
/// Total over all inputs: unknown ids fall back to [`Bucket::Gpt3`].
pub fn resolve_bucket(model: &str, reversible: bool) -> Bucket {
    ModelFamily::from_model_id(model).bucket(reversible)
}

/// Table ids routed to `bucket`, for display.
///
/// Ids whose bucket depends on `reversible` carry a `(reversible)` or
/// `(not reversible)` suffix; the rest are listed once.
pub fn routed_models(bucket: Bucket) -> Vec<String> {
    let mut models = Vec::new();
    for (id, family) in MODEL_TABLE {
        let plain = family.bucket(false);
        let reversible = family.bucket(true);
        if plain == reversible {
            if plain == bucket {
                models.push(id.to_string());
            }
            continue;
        }
        if plain == bucket {
            models.push(format!("{id} (not reversible)"));
        }
        if reversible == bucket {
            models.push(format!("{id} (reversible)"));
        }
    }
    models
}
