use crate::commands::resolve_records;
use fairdraw_core::codec;
use fairdraw_core::{Result, Storage};

/// Print share text for the newest draw matching `code`.
pub fn share_draw(storage: &Storage, code: &str, base_url: &str) -> Result<()> {
    let records = resolve_records(storage, code)?;
    if records.len() > 1 {
        tracing::warn!(
            "Code {} matches {} draws, sharing the newest",
            code,
            records.len()
        );
    }

    let record = &records[0];
    println!("{}", codec::to_share_text(&record.proof, base_url)?);
    Ok(())
}
