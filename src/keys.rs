//! Candidate API-key parsing and selection.
//!
//! A bucket's `apikey` value may list several keys separated by `|`. Each
//! resolution picks one of them so load spreads across credentials.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Separator between candidate keys in an `apikey` value.
pub const KEY_DELIMITER: char = '|';

/// Split a raw `apikey` value into candidate keys.
///
/// Entries are trimmed and blanks are dropped, so `"a| b ||"` yields
/// `["a", "b"]` and an empty value yields no candidates.
pub fn split_keys(raw: &str) -> Vec<String> {
    raw.split(KEY_DELIMITER)
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strategy for choosing one key among the candidates of a bucket.
pub trait KeyPicker: Send + Sync {
    /// Choose one candidate, or `None` when there are none.
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str>;
}

/// Uniform choice using the thread-local RNG. Used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeyPicker;

impl KeyPicker for RandomKeyPicker {
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

/// Uniform choice from a seeded RNG, for reproducible key sequences.
#[derive(Debug)]
pub struct SeededKeyPicker {
    rng: Mutex<StdRng>,
}

impl SeededKeyPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl KeyPicker for SeededKeyPicker {
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        // A poisoned lock only means another picker call panicked; the RNG
        // state is still usable.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        candidates.choose(&mut *rng).map(String::as_str)
    }
}

impl<P: KeyPicker + ?Sized> KeyPicker for &P {
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        (**self).pick(candidates)
    }
}

/// Mask a key for display: keep a short prefix and suffix.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
