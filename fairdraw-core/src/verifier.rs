//! Replay-and-compare verification of proofs.
//!
//! No signatures or external ledger: a proof is valid when re-running its
//! own algorithm on its own seed and config reproduces its result and hash.

use crate::algorithms;
use crate::codec;
use crate::config::VerificationPolicy;
use crate::digest::ProofHasher;
use crate::error::{DrawError, ErrorKind, Result};
use crate::proof::{Proof, PROOF_VERSION};
use crate::seed::{Clock, SystemEntropy};
use crate::types::{DrawKind, DrawResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A proof that passed every check.
#[derive(Debug, Clone)]
pub struct VerifiedProof {
    pub kind: DrawKind,
    pub timestamp: DateTime<Utc>,
    pub verification_code: String,
    pub result: DrawResult,
}

/// Flat verdict for display and JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

pub struct ProofVerifier {
    hasher: Arc<dyn ProofHasher>,
    policy: VerificationPolicy,
    clock: Arc<dyn Clock>,
}

impl ProofVerifier {
    pub fn new(hasher: Arc<dyn ProofHasher>, policy: VerificationPolicy) -> Self {
        Self::with_clock(hasher, policy, Arc::new(SystemEntropy))
    }

    pub fn with_clock(
        hasher: Arc<dyn ProofHasher>,
        policy: VerificationPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hasher,
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    pub fn verify(&self, proof: &Proof) -> Result<VerifiedProof> {
        let outcome = self.check(proof);
        match &outcome {
            Ok(verified) => tracing::info!(
                "Verified {} proof {} ({})",
                verified.kind,
                proof.hash,
                verified.verification_code
            ),
            Err(e) => tracing::warn!("Proof {} rejected: {}", proof.hash, e),
        }
        outcome
    }

    fn check(&self, proof: &Proof) -> Result<VerifiedProof> {
        let timestamp = self.check_structure(proof)?;

        let config = proof
            .draw_config()
            .map_err(|e| DrawError::malformed(e.to_string()))?;
        config
            .validate()
            .map_err(|e| DrawError::malformed(format!("config cannot produce a draw: {}", e)))?;

        let replayed = algorithms::run(&config, &proof.seed)
            .map_err(|e| DrawError::malformed(format!("replay failed: {}", e)))?;
        if replayed.to_value()? != proof.result {
            return Err(DrawError::ResultMismatch);
        }

        let computed = self.hasher.hash_value(&proof.hash_input());
        if computed != proof.hash {
            return Err(DrawError::HashMismatch {
                recorded: proof.hash.clone(),
                computed,
            });
        }

        self.check_policy(timestamp)?;

        Ok(VerifiedProof {
            kind: proof.kind,
            timestamp,
            verification_code: codec::verification_code(proof)?,
            result: replayed,
        })
    }

    fn check_structure(&self, proof: &Proof) -> Result<DateTime<Utc>> {
        if proof.seed.is_empty() {
            return Err(DrawError::malformed("seed is empty"));
        }
        if proof.algorithm != proof.kind.algorithm_id() {
            return Err(DrawError::malformed(format!(
                "algorithm '{}' does not match type '{}'",
                proof.algorithm, proof.kind
            )));
        }
        if proof.version != PROOF_VERSION {
            return Err(DrawError::malformed(format!(
                "unsupported proof version '{}'",
                proof.version
            )));
        }
        if !proof.config.is_object() || !proof.result.is_object() {
            return Err(DrawError::malformed("config and result must be objects"));
        }

        let width = self.hasher.width();
        let well_formed = proof.hash.len() == width
            && proof
                .hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(DrawError::malformed(format!(
                "hash must be {} lowercase hex digits",
                width
            )));
        }

        proof.timestamp()
    }

    fn check_policy(&self, timestamp: DateTime<Utc>) -> Result<()> {
        let now = self.clock.now();

        let skew = chrono::Duration::from_std(self.policy.max_future_skew)
            .map_err(|e| DrawError::config(e.to_string()))?;
        if timestamp > now + skew {
            return Err(DrawError::stale(format!(
                "timestamp {} is in the future",
                timestamp
            )));
        }

        if let Some(max_age) = self.policy.max_age {
            let max_age =
                chrono::Duration::from_std(max_age).map_err(|e| DrawError::config(e.to_string()))?;
            if now - timestamp > max_age {
                return Err(DrawError::stale(format!(
                    "proof from {} is past the retention horizon",
                    timestamp
                )));
            }
        }

        Ok(())
    }

    pub fn verify_value(&self, value: Value) -> Result<VerifiedProof> {
        self.verify(&Proof::from_value(value)?)
    }

    pub fn verify_json(&self, json: &str) -> Result<VerifiedProof> {
        self.verify(&Proof::from_json(json)?)
    }

    pub fn report(&self, proof: &Proof) -> VerificationReport {
        Self::to_report(self.verify(proof))
    }

    pub fn report_json(&self, json: &str) -> VerificationReport {
        Self::to_report(self.verify_json(json))
    }

    fn to_report(outcome: Result<VerifiedProof>) -> VerificationReport {
        match outcome {
            Ok(verified) => VerificationReport::valid(&verified),
            Err(e) => VerificationReport::invalid(&e),
        }
    }
}

impl VerificationReport {
    pub fn valid(verified: &VerifiedProof) -> Self {
        Self {
            valid: true,
            reason: None,
            error: None,
            timestamp: Some(crate::proof::format_timestamp(verified.timestamp)),
        }
    }

    pub fn invalid(err: &DrawError) -> Self {
        Self {
            valid: false,
            reason: Some(err.to_string()),
            error: Some(err.kind()),
            timestamp: None,
        }
    }
}
