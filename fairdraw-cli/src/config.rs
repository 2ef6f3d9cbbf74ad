use anyhow::Context;
use fairdraw_core::{EngineConfig, HashAlgorithm, VerificationPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";
const DAY: u64 = 24 * 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    /// Page that accepts `?code=..&proof=..`
    pub verify_base_url: String,
    pub hash_algorithm: HashAlgorithm,
    /// Reject proofs older than this when verifying
    pub retention_days: Option<u64>,
    /// Store every draw in the history database
    pub auto_save: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            verify_base_url: "https://fairdraw.app/verify".to_string(),
            hash_algorithm: HashAlgorithm::Djb2,
            retention_days: None,
            auto_save: true,
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fairdraw")
}

impl CliConfig {
    /// Load `config.json` from `data_dir`, writing defaults on first run.
    pub fn load_or_create(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(CONFIG_FILE);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            let config = Self::default();
            std::fs::write(&path, serde_json::to_string_pretty(&config)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!("Wrote default config to {}", path.display());
            config
        };

        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("fairdraw.db")
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.hash_algorithm)
    }

    /// `max_age_days` overrides the configured retention horizon.
    pub fn verification_policy(&self, max_age_days: Option<u64>) -> VerificationPolicy {
        match max_age_days.or(self.retention_days) {
            Some(days) => VerificationPolicy::with_max_age(Duration::from_secs(days * DAY)),
            None => VerificationPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = CliConfig::load_or_create(temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
        assert_eq!(config.data_dir, temp_dir.path());
        assert!(config.auto_save);

        let reloaded = CliConfig::load_or_create(temp_dir.path()).unwrap();
        assert_eq!(reloaded.verify_base_url, config.verify_base_url);
    }

    #[test]
    fn test_partial_config_file() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE),
            r#"{"hash_algorithm": "sha256", "retention_days": 30}"#,
        )
        .unwrap();

        let config = CliConfig::load_or_create(temp_dir.path()).unwrap();
        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha256);
        assert!(config.auto_save);
        assert_eq!(
            config.verification_policy(None).max_age,
            Some(Duration::from_secs(30 * DAY))
        );
        assert_eq!(
            config.verification_policy(Some(1)).max_age,
            Some(Duration::from_secs(DAY))
        );
    }
}
