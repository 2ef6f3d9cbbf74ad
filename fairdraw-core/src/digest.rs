//! Canonical JSON and the digests computed over it.
//!
//! The same djb2 primitive feeds both seed-to-number conversion and proof
//! hashing. The proof hash is a tamper indicator, not a cryptographic
//! commitment; [`Sha256Hasher`] can replace it behind [`ProofHasher`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const DJB2_INIT: u32 = 5381;

/// djb2 (xor variant) over the UTF-16 code units of `input`.
pub fn djb2(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(DJB2_INIT, |hash, unit| hash.wrapping_mul(33) ^ unit as u32)
}

/// Serialize `value` with object keys sorted at every depth.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Produces the opaque, equality-comparable token stored in `Proof::hash`.
pub trait ProofHasher: Send + Sync {
    fn algorithm(&self) -> HashAlgorithm;

    fn hash_str(&self, input: &str) -> String;

    /// Hex digits in every digest this hasher emits.
    fn width(&self) -> usize;

    fn hash_value(&self, value: &Value) -> String {
        self.hash_str(&canonical_json(value))
    }
}

/// 32-bit djb2, rendered as 8 lowercase hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Djb2Hasher;

impl ProofHasher for Djb2Hasher {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Djb2
    }

    fn hash_str(&self, input: &str) -> String {
        format!("{:08x}", djb2(input))
    }

    fn width(&self) -> usize {
        8
    }
}

/// SHA-256 over the canonical JSON bytes, 64 lowercase hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ProofHasher for Sha256Hasher {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn hash_str(&self, input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn width(&self) -> usize {
        64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Djb2,
    Sha256,
}

impl HashAlgorithm {
    pub fn hasher(self) -> Arc<dyn ProofHasher> {
        match self {
            HashAlgorithm::Djb2 => Arc::new(Djb2Hasher),
            HashAlgorithm::Sha256 => Arc::new(Sha256Hasher),
        }
    }

    /// Guess the algorithm that produced a recorded hash from its width.
    pub fn detect(hash: &str) -> Option<HashAlgorithm> {
        match hash.len() {
            8 => Some(HashAlgorithm::Djb2),
            64 => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Djb2 => write!(f, "djb2"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = crate::DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "djb2" => Ok(HashAlgorithm::Djb2),
            "sha256" => Ok(HashAlgorithm::Sha256),
            other => Err(crate::DrawError::config(format!(
                "unknown hash algorithm '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        // 5381 * 33 ^ 'a'
        assert_eq!(djb2("a"), (5381u32 * 33) ^ 97);
    }

    #[test]
    fn test_djb2_uses_utf16_units() {
        // U+1F3B2 is a surrogate pair in UTF-16.
        let expected = [0xd83cu32, 0xdfb2]
            .iter()
            .fold(DJB2_INIT, |h, &u| h.wrapping_mul(33) ^ u);
        assert_eq!(djb2("\u{1F3B2}"), expected);
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let value = json!({"b": 1, "a": {"z": [true, null], "y": "x"}});
        assert_eq!(
            canonical_json(&value),
            r#"{"a":{"y":"x","z":[true,null]},"b":1}"#
        );
    }

    #[test]
    fn test_hash_ignores_key_order() {
        let first: Value =
            serde_json::from_str(r#"{"seed":"abc","type":"names","config":{"count":2,"items":["A"]}}"#)
                .unwrap();
        let second: Value =
            serde_json::from_str(r#"{"config":{"items":["A"],"count":2},"type":"names","seed":"abc"}"#)
                .unwrap();

        for hasher in [HashAlgorithm::Djb2.hasher(), HashAlgorithm::Sha256.hasher()] {
            assert_eq!(hasher.hash_value(&first), hasher.hash_value(&second));
        }
    }

    #[test]
    fn test_hash_width() {
        let value = json!({"k": "v"});
        let djb = Djb2Hasher.hash_value(&value);
        assert_eq!(djb.len(), 8);
        assert!(djb.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(Sha256Hasher.hash_value(&value).len(), 64);
    }

    #[test]
    fn test_hash_sensitive_to_values() {
        let a = Djb2Hasher.hash_value(&json!({"result": ["A", "B"]}));
        let b = Djb2Hasher.hash_value(&json!({"result": ["B", "A"]}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_detect_by_width() {
        let djb2 = Djb2Hasher.hash_str("abc");
        let sha = Sha256Hasher.hash_str("abc");
        assert_eq!(HashAlgorithm::detect(&djb2), Some(HashAlgorithm::Djb2));
        assert_eq!(HashAlgorithm::detect(&sha), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::detect("abc"), None);
    }
}
