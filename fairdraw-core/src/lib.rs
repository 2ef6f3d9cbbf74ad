//! FairDraw - deterministic, independently verifiable random draws
//!
//! A draw (names, numbers, teams, running order, bingo) is a pure function of
//! its configuration and a recorded seed. Every draw is sealed into a
//! [`Proof`] that anyone can replay with [`ProofVerifier`] to confirm the
//! result and its hash, without trusting the device that ran it.

pub mod algorithms;
pub mod codec;
pub mod config;
pub mod digest;
pub mod engine;
pub mod error;
pub mod proof;
pub mod rng;
pub mod seed;
pub mod storage;
pub mod types;
pub mod verifier;

pub use config::{EngineConfig, VerificationPolicy};
pub use digest::{HashAlgorithm, ProofHasher};
pub use engine::{DrawOutcome, DrawResponse, LotteryEngine};
pub use error::{DrawError, ErrorKind, Result};
pub use proof::Proof;
pub use seed::{EntropySource, FixedEntropy, SystemEntropy};
pub use storage::{DrawRecord, DrawStore, SavedList, Storage};
pub use types::{DrawConfig, DrawKind, DrawResult};
pub use verifier::{ProofVerifier, VerificationReport, VerifiedProof};

#[cfg(test)]
mod tests {
    use super::*;
    use algorithms::{NamesConfig, OrderConfig};
    use tempfile::tempdir;

    #[test]
    fn test_draw_store_verify() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(&temp_dir.path().join("fairdraw.db")).unwrap();
        let engine = LotteryEngine::new(EngineConfig::default()).unwrap();

        let config: DrawConfig =
            NamesConfig::new(vec!["A".into(), "B".into(), "C".into()], 2).into();
        let outcome = engine.perform_draw(&config).unwrap();
        let record = DrawRecord::from_proof(outcome.proof.clone()).unwrap();
        storage.draws().save_draw(&record).unwrap();

        let found = storage.draws().find_by_code(&record.verification_code).unwrap();
        assert_eq!(found.len(), 1);

        let verifier = engine.verifier(VerificationPolicy::default());
        let verified = verifier.verify(&found[0].proof).unwrap();
        assert_eq!(verified.result, outcome.result);
    }

    #[test]
    fn test_engine_shared_across_threads() {
        let engine = std::sync::Arc::new(LotteryEngine::new(EngineConfig::default()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let items = (0..=i).map(|n| n.to_string()).collect();
                    engine.perform_draw(&OrderConfig::new(items).into()).unwrap()
                })
            })
            .collect();

        let verifier = engine.verifier(VerificationPolicy::default());
        for handle in handles {
            let outcome = handle.join().unwrap();
            assert!(verifier.report(&outcome.proof).valid);
        }
    }
}
