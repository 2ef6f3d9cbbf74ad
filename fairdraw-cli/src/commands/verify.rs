use crate::commands::resolve_records;
use crate::config::CliConfig;
use clap::Args;
use fairdraw_core::codec;
use fairdraw_core::{
    DrawError, HashAlgorithm, LotteryEngine, Proof, ProofVerifier, Result, Storage,
    VerificationReport, VerifiedProof,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Args)]
pub struct VerifyArgs {
    /// Proof JSON file, or '-' to read from stdin
    file: Option<PathBuf>,
    /// Verification URL carrying the proof
    #[arg(long, conflicts_with_all = ["file", "code"])]
    url: Option<String>,
    /// Verification code or draw ID from history
    #[arg(long, conflicts_with = "file")]
    code: Option<String>,
    /// Reject proofs older than this many days
    #[arg(long)]
    max_age_days: Option<u64>,
    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,
}

pub fn handle_verify_command(
    args: VerifyArgs,
    engine: &LotteryEngine,
    storage: &Storage,
    config: &CliConfig,
) -> Result<()> {
    let proofs = load_proofs(&args, storage)?;
    let policy = config.verification_policy(args.max_age_days);

    let mut failure = None;
    for proof in &proofs {
        // Proofs sealed with another hasher are checked with that hasher
        let verifier = match HashAlgorithm::detect(&proof.hash) {
            Some(algorithm) if algorithm != engine.hasher().algorithm() => {
                ProofVerifier::new(algorithm.hasher(), policy.clone())
            }
            _ => engine.verifier(policy.clone()),
        };

        match verifier.verify(proof) {
            Ok(verified) => print_valid(proof, &verified, args.json)?,
            Err(e) if e.is_verification_failure() => {
                print_invalid(proof, &e, args.json)?;
                failure = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn load_proofs(args: &VerifyArgs, storage: &Storage) -> Result<Vec<Proof>> {
    if let Some(url) = &args.url {
        return Ok(vec![codec::proof_from_url(url)?]);
    }

    if let Some(code) = &args.code {
        let records = resolve_records(storage, code)?;
        if records.len() > 1 {
            println!(
                "Code {} matches {} stored draws, verifying all of them",
                codec::normalize_code(code),
                records.len()
            );
        }
        return Ok(records.into_iter().map(|r| r.proof).collect());
    }

    let json = match &args.file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        Some(_) => read_stdin()?,
        None => {
            return Err(DrawError::invalid_input(
                "provide a proof file, '-' for stdin, --url or --code",
            ))
        }
    };
    Ok(vec![Proof::from_json(&json)?])
}

fn read_stdin() -> Result<String> {
    let mut json = String::new();
    std::io::stdin().read_to_string(&mut json)?;
    Ok(json)
}

fn print_valid(proof: &Proof, verified: &VerifiedProof, json: bool) -> Result<()> {
    if json {
        let report = VerificationReport::valid(verified);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("✓ Valid {} draw ({})", verified.kind, verified.verification_code);
    println!("  Drawn at: {}", proof.timestamp);
    println!("  Result: {}", verified.result);
    println!("  Hash: {}", proof.hash);
    Ok(())
}

fn print_invalid(proof: &Proof, err: &DrawError, json: bool) -> Result<()> {
    if json {
        let report = VerificationReport::invalid(err);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("✗ Invalid proof {}", proof.hash);
    Ok(())
}
