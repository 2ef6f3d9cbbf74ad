use fairdraw_core::algorithms::{NamesConfig, TeamsConfig};
use fairdraw_core::codec;
use fairdraw_core::{
    DrawConfig, DrawRecord, DrawStore, EngineConfig, LotteryEngine, Storage, VerificationPolicy,
};
use tempfile::tempdir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let temp_dir = tempdir()?;
    println!("Using temporary directory: {:?}", temp_dir.path());

    let storage = Storage::open(&temp_dir.path().join("fairdraw.db"))?;
    let engine = LotteryEngine::new(EngineConfig::default())?;

    // Save a roster and draw from it
    let roster = storage.lists().save_list(
        "class-5b",
        &["Ana".into(), "Ben".into(), "Chloe".into(), "Dev".into(), "Eli".into()],
    )?;
    println!("Saved list '{}' with {} entries", roster.name, roster.items.len());

    let draw: DrawConfig = NamesConfig::new(roster.items.clone(), 2).into();
    let outcome = engine.perform_draw(&draw)?;
    println!("\nWinners: {}", outcome.result);
    println!("Proof:\n{}", outcome.proof.to_json_pretty()?);

    let record = DrawRecord::from_proof(outcome.proof.clone())?;
    storage.draws().save_draw(&record)?;
    println!("\nStored as {} (code {})", record.id, record.verification_code);

    // Anyone holding the proof can replay it
    let verifier = engine.verifier(VerificationPolicy::default());
    let verified = verifier.verify(&outcome.proof)?;
    println!("Verified {} draw from {}", verified.kind, verified.timestamp);

    let url = codec::to_verification_url(&outcome.proof, "https://fairdraw.app/verify")?;
    let decoded = codec::proof_from_url(&url)?;
    println!("Verification URL round trip ok: {}", decoded == outcome.proof);

    let teams: DrawConfig = TeamsConfig::new(roster.items, 2, true).into();
    println!("\nTeams: {}", engine.perform_draw(&teams)?.result);

    println!("\nExample completed successfully!");

    Ok(())
}
