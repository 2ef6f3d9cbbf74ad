//! Human-facing encodings of a proof: verification code, URL, share text.
//!
//! The code is a lookup key, not a security token. Two draws may share a
//! code; the full proof stays the source of truth.

use crate::error::{DrawError, Result};
use crate::proof::Proof;
use base64::{engine::general_purpose, Engine as _};

const CODE_HASH_CHARS: usize = 4;
const CODE_TIME_DIGITS: usize = 4;

/// `upper(hash[0..4]) + "-" + last four digits of the timestamp millis`.
pub fn verification_code(proof: &Proof) -> Result<String> {
    let prefix: String = proof
        .hash
        .chars()
        .take(CODE_HASH_CHARS)
        .collect::<String>()
        .to_uppercase();

    let millis = proof.timestamp()?.timestamp_millis().unsigned_abs().to_string();
    let digits = &millis[millis.len().saturating_sub(CODE_TIME_DIGITS)..];

    Ok(format!("{}-{:0>width$}", prefix, digits, width = CODE_TIME_DIGITS))
}

/// Normalize user-typed codes: trim, uppercase.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn to_verification_url(proof: &Proof, base_url: &str) -> Result<String> {
    let code = verification_code(proof)?;
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(proof.to_json()?);
    let separator = if base_url.contains('?') { '&' } else { '?' };
    Ok(format!(
        "{}{}code={}&proof={}",
        base_url, separator, code, encoded
    ))
}

/// Recover the proof embedded by [`to_verification_url`].
pub fn proof_from_url(url: &str) -> Result<Proof> {
    let query = url
        .split_once('?')
        .map(|(_, query)| query)
        .ok_or_else(|| DrawError::malformed("verification URL has no query string"))?;

    let encoded = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("proof="))
        .ok_or_else(|| DrawError::malformed("verification URL has no proof parameter"))?;

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(encoded.split('#').next().unwrap_or_default())
        .map_err(|e| DrawError::malformed(format!("proof parameter is not base64: {}", e)))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| DrawError::malformed(format!("proof parameter is not UTF-8: {}", e)))?;

    Proof::from_json(&json)
}

pub fn to_share_text(proof: &Proof, base_url: &str) -> Result<String> {
    let summary = proof.draw_result()?.summary();
    let title = proof
        .config
        .get("title")
        .and_then(|t| t.as_str())
        .map(|t| format!("{} ({} draw)", t, proof.kind))
        .unwrap_or_else(|| format!("{} draw", capitalize(proof.kind.as_str())));

    let lines = [
        title,
        format!("Result: {}", summary),
        format!("Drawn at: {}", proof.timestamp),
        format!("Verification code: {}", verification_code(proof)?),
        format!("Seed: {}", proof.seed),
        format!("Hash: {}", proof.hash),
        format!("Verify: {}", to_verification_url(proof, base_url)?),
    ];
    Ok(lines.join("\n"))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
