//! Seed derivation and seed-to-number conversion.

use crate::digest::djb2;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Seeds are truncated to this many characters.
pub const SEED_LENGTH: usize = 32;

const TOKEN_LENGTH: usize = 10;
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Wall clock used for proof timestamps and staleness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Weak entropy mixed into every seed.
pub trait EntropySource: Clock {
    /// Short random token, base-36.
    fn token(&self) -> String;
}

/// System clock plus thread-local `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl Clock for SystemEntropy {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl EntropySource for SystemEntropy {
    fn token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..TOKEN_LENGTH)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }
}

/// Constant clock and token, for reproducible draws in tests and demos.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pub now: DateTime<Utc>,
    pub token: String,
}

impl FixedEntropy {
    pub fn new(now: DateTime<Utc>, token: impl Into<String>) -> Self {
        Self {
            now,
            token: token.into(),
        }
    }
}

impl Clock for FixedEntropy {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl EntropySource for FixedEntropy {
    fn token(&self) -> String {
        self.token.clone()
    }
}

/// Build a seed from its ingredients.
///
/// Timestamp and token lead the material so the truncated seed differs per
/// draw even for identical configs.
pub fn derive_seed(
    canonical_config: &str,
    timestamp_millis: i64,
    token: &str,
    platform: &str,
) -> String {
    let material = format!("{}{}{}{}", timestamp_millis, token, platform, canonical_config);
    general_purpose::STANDARD
        .encode(material.as_bytes())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(SEED_LENGTH)
        .collect()
}

/// 32-bit generator input for `seed`.
pub fn seed_number(seed: &str) -> u32 {
    (djb2(seed) as i32).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_seed_shape() {
        let config = r#"{"count":1,"items":["A"]}"#;
        let seed = derive_seed(config, 1_700_000_000_000, "k3j9x0a1b2", "linux");
        assert_eq!(seed.len(), SEED_LENGTH);
        assert!(seed.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_seed_varies_with_token_and_time() {
        let config = r#"{"count":1,"items":["A"]}"#;
        let base = derive_seed(config, 1_700_000_000_000, "aaaaaaaaaa", "linux");
        assert_eq!(base, derive_seed(config, 1_700_000_000_000, "aaaaaaaaaa", "linux"));
        assert_ne!(base, derive_seed(config, 1_700_000_000_001, "aaaaaaaaaa", "linux"));
        assert_ne!(base, derive_seed(config, 1_700_000_000_000, "bbbbbbbbbb", "linux"));
    }

    #[test]
    fn test_short_material_not_padded() {
        let seed = derive_seed("", 1, "", "");
        // base64("1") == "MQ=="
        assert_eq!(seed, "MQ");
    }

    #[test]
    fn test_seed_number_is_absolute() {
        for seed in ["X", "Y", "a-much-longer-seed-value-0123456789", ""] {
            let n = seed_number(seed);
            assert!(n <= i32::MAX as u32 + 1);
        }
        assert_eq!(seed_number(""), 5381);
    }

    #[test]
    fn test_system_token() {
        let token = SystemEntropy.token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_fixed_entropy() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let entropy = FixedEntropy::new(now, "tok");
        assert_eq!(entropy.now(), now);
        assert_eq!(entropy.token(), "tok");
    }
}
