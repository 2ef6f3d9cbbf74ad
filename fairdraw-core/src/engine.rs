use crate::algorithms;
use crate::codec;
use crate::config::{EngineConfig, VerificationPolicy};
use crate::digest::{canonical_json, ProofHasher};
use crate::error::{DrawError, ErrorKind, Result};
use crate::proof::{format_timestamp, Proof, PROOF_VERSION};
use crate::seed::{derive_seed, EntropySource, SystemEntropy};
use crate::types::{DrawConfig, DrawKind, DrawResult};
use crate::verifier::ProofVerifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A finished draw: the typed result and its shareable proof.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub result: DrawResult,
    pub proof: Proof,
}

/// Tagged response shape for callers that cannot consume `Result`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Failure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&DrawError> for Failure {
    fn from(err: &DrawError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl DrawResponse {
    pub fn failure(err: &DrawError) -> Self {
        Self {
            success: false,
            result: None,
            proof: None,
            error: Some(err.into()),
        }
    }
}

/// Runs draws and seals them into proofs.
///
/// Holds no mutable state; share it freely between threads.
pub struct LotteryEngine {
    config: EngineConfig,
    entropy: Arc<dyn EntropySource>,
    hasher: Arc<dyn ProofHasher>,
}

impl LotteryEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_entropy(config, Arc::new(SystemEntropy))
    }

    pub fn with_entropy(config: EngineConfig, entropy: Arc<dyn EntropySource>) -> Result<Self> {
        config.validate()?;
        let hasher = config.hash_algorithm.hasher();

        Ok(Self {
            config,
            entropy,
            hasher,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hasher(&self) -> Arc<dyn ProofHasher> {
        self.hasher.clone()
    }

    /// Verifier sharing this engine's hasher.
    pub fn verifier(&self, policy: VerificationPolicy) -> ProofVerifier {
        ProofVerifier::new(self.hasher.clone(), policy)
    }

    /// Config as embedded in proofs, private keys removed.
    pub fn sanitize(&self, config: &DrawConfig) -> Result<Value> {
        let mut value = config.to_value()?;
        if let Some(object) = value.as_object_mut() {
            object.retain(|key, _| !self.config.is_private(key));
        }
        Ok(value)
    }

    pub fn perform_draw(&self, config: &DrawConfig) -> Result<DrawOutcome> {
        let kind = config.kind();
        config.validate()?;

        let public_config = self.sanitize(config)?;
        let now = self.entropy.now();
        let seed = derive_seed(
            &canonical_json(&public_config),
            now.timestamp_millis(),
            &self.entropy.token(),
            &self.config.platform,
        );
        tracing::debug!("Derived seed {} for {} draw", seed, kind);

        let result = algorithms::run(config, &seed)?;

        let mut proof = Proof {
            seed,
            timestamp: format_timestamp(now),
            kind,
            config: public_config,
            result: result.to_value()?,
            hash: String::new(),
            algorithm: kind.algorithm_id(),
            version: PROOF_VERSION.to_string(),
        };
        proof.hash = self.hasher.hash_value(&proof.hash_input());

        tracing::info!(
            "Completed {} draw {} ({})",
            kind,
            proof.hash,
            codec::verification_code(&proof)?
        );

        Ok(DrawOutcome { result, proof })
    }

    /// Untyped entry point: `kind` as a string, config as JSON.
    pub fn perform_draw_raw(&self, kind: &str, config: Value) -> Result<DrawOutcome> {
        let kind: DrawKind = kind.parse()?;
        let config = DrawConfig::from_value(kind, config)?;
        self.perform_draw(&config)
    }

    pub fn perform_draw_response(&self, kind: &str, config: Value) -> DrawResponse {
        match self.perform_draw_raw(kind, config) {
            Ok(outcome) => match outcome.result.to_value() {
                Ok(result) => DrawResponse {
                    success: true,
                    result: Some(result),
                    proof: Some(outcome.proof),
                    error: None,
                },
                Err(e) => DrawResponse::failure(&e),
            },
            Err(e) => {
                tracing::warn!("Draw failed: {}", e);
                DrawResponse::failure(&e)
            }
        }
    }
}

impl std::fmt::Debug for LotteryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LotteryEngine")
            .field("config", &self.config)
            .field("hash_algorithm", &self.hasher.algorithm())
            .finish()
    }
}
