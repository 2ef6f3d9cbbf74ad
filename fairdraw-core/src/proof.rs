use crate::error::{DrawError, Result};
use crate::types::{DrawConfig, DrawKind, DrawResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Proof format version.
pub const PROOF_VERSION: &str = "1.0.0";

/// Self-contained record of one draw.
///
/// Anyone holding a proof can replay the draw from `seed` and `config` and
/// recompute `hash` over `{seed, timestamp, type, config, result}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    pub seed: String,
    /// ISO-8601, millisecond precision, UTC
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: DrawKind,
    pub config: Value,
    pub result: Value,
    pub hash: String,
    pub algorithm: String,
    pub version: String,
}

impl Proof {
    /// The hashed subset of the proof.
    pub fn hash_input(&self) -> Value {
        json!({
            "seed": self.seed,
            "timestamp": self.timestamp,
            "type": self.kind,
            "config": self.config,
            "result": self.result,
        })
    }

    pub fn timestamp(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    pub fn draw_config(&self) -> Result<DrawConfig> {
        DrawConfig::from_value(self.kind, self.config.clone())
    }

    pub fn draw_result(&self) -> Result<DrawResult> {
        DrawResult::from_value(self.kind, self.result.clone())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DrawError::malformed(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| DrawError::malformed(e.to_string()))
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DrawError::malformed(format!("invalid timestamp '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Proof {
        Proof {
            seed: "MTcwMDAwMDAwMDAwMGFiYw".into(),
            timestamp: "2024-03-09T16:20:31.123Z".into(),
            kind: DrawKind::Names,
            config: json!({"items": ["A", "B", "C"], "count": 2}),
            result: json!({"winners": ["C", "A"]}),
            hash: "0123abcd".into(),
            algorithm: "names-v1.0".into(),
            version: PROOF_VERSION.into(),
        }
    }

    #[test]
    fn test_json_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["algorithm", "config", "hash", "result", "seed", "timestamp", "type", "version"]
        );
        assert_eq!(value["type"], "names");
    }

    #[test]
    fn test_json_round_trip_preserves_everything() {
        let proof = sample();
        let parsed = Proof::from_json(&proof.to_json().unwrap()).unwrap();
        assert_eq!(parsed, proof);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value.as_object_mut().unwrap().remove("seed");
        assert!(matches!(Proof::from_value(value), Err(DrawError::MalformedProof(_))));
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["type"] = json!("raffle");
        assert!(matches!(Proof::from_value(value), Err(DrawError::MalformedProof(_))));
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 16, 20, 31).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(format_timestamp(at), "2024-03-09T16:20:31.123Z");
        assert_eq!(sample().timestamp().unwrap(), at);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_hash_input_excludes_hash_and_labels() {
        let input = sample().hash_input();
        let object = input.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(object.get("hash").is_none());
        assert!(object.get("algorithm").is_none());
    }
}
