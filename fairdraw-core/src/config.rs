use crate::digest::HashAlgorithm;
use crate::error::{DrawError, Result};
use crate::types::DrawKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Platform tag mixed into seeds
    pub platform: String,
    /// Config keys removed before a proof is shared. Keys starting with `_`
    /// are always removed.
    pub private_keys: Vec<String>,
    pub hash_algorithm: HashAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            private_keys: vec!["listId".to_string(), "userId".to_string()],
            hash_algorithm: HashAlgorithm::Djb2,
        }
    }
}

impl EngineConfig {
    pub fn new(hash_algorithm: HashAlgorithm) -> Self {
        Self {
            hash_algorithm,
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn is_private(&self, key: &str) -> bool {
        key.starts_with('_') || self.private_keys.iter().any(|k| k == key)
    }

    pub fn validate(&self) -> Result<()> {
        if self.platform.is_empty() {
            return Err(DrawError::config("Platform tag cannot be empty"));
        }

        for key in &self.private_keys {
            if DrawKind::ALL
                .iter()
                .any(|kind| kind.input_keys().contains(&key.as_str()))
            {
                return Err(DrawError::config(format!(
                    "'{}' is a draw input and cannot be private",
                    key
                )));
            }
        }

        Ok(())
    }
}

/// Caller policy on proof age, applied after replay succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationPolicy {
    /// Reject proofs older than this
    pub max_age: Option<Duration>,
    /// Tolerated clock difference for timestamps in the future
    pub max_future_skew: Duration,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            max_age: None,
            max_future_skew: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl VerificationPolicy {
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
            ..Self::default()
        }
    }

    /// One-year retention, one-minute skew.
    pub fn strict() -> Self {
        Self {
            max_age: Some(Duration::from_secs(365 * 24 * 3600)),
            max_future_skew: Duration::from_secs(60),
        }
    }
}
