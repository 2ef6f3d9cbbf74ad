use crate::codec::{normalize_code, verification_code};
use crate::error::{DrawError, Result};
use crate::proof::Proof;
use crate::storage::{timestamp_from_millis, Storage};
use crate::types::DrawKind;
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub id: Uuid,
    pub kind: DrawKind,
    pub verification_code: String,
    pub proof: Proof,
    pub created_at: DateTime<Utc>,
}

impl DrawRecord {
    pub fn from_proof(proof: Proof) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            kind: proof.kind,
            verification_code: verification_code(&proof)?,
            created_at: proof.timestamp()?,
            proof,
        })
    }
}

/// Lookup interface over stored draws.
pub trait DrawStore {
    fn save_draw(&self, record: &DrawRecord) -> Result<()>;

    fn get_draw(&self, id: Uuid) -> Result<DrawRecord>;

    /// Codes can collide, so every match is returned, newest first.
    fn find_by_code(&self, code: &str) -> Result<Vec<DrawRecord>>;

    fn find_by_hash_prefix(&self, prefix: &str) -> Result<Vec<DrawRecord>>;

    fn list_draws(&self, limit: usize) -> Result<Vec<DrawRecord>>;

    /// Returns whether a record was removed.
    fn delete_draw(&self, id: Uuid) -> Result<bool>;

    /// Returns the number of removed records.
    fn clear_draws(&self) -> Result<usize>;
}

pub struct DrawHistory<'a> {
    storage: &'a Storage,
}

type RawDraw = (String, String, String, i64);

const SELECT_DRAWS: &str = "SELECT id, verification_code, proof, created_at FROM draws";

impl<'a> DrawHistory<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<DrawRecord>> {
        let conn = self.storage.get_connection();
        let mut stmt = conn.prepare(sql)?;

        let rows = stmt.query_map(params, |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(Self::to_record(row?)?);
        }

        Ok(records)
    }

    fn to_record((id, verification_code, proof, created_at): RawDraw) -> Result<DrawRecord> {
        let id = Uuid::parse_str(&id)
            .map_err(|e| DrawError::internal(format!("Invalid draw id '{}': {}", id, e)))?;
        let proof: Proof = serde_json::from_str(&proof)?;

        Ok(DrawRecord {
            id,
            kind: proof.kind,
            verification_code,
            created_at: timestamp_from_millis(created_at, "created_at")?,
            proof,
        })
    }
}

impl DrawStore for DrawHistory<'_> {
    fn save_draw(&self, record: &DrawRecord) -> Result<()> {
        let conn = self.storage.get_connection();

        conn.execute(
            "INSERT OR REPLACE INTO draws (id, kind, verification_code, hash, proof, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id.to_string(),
                record.kind.as_str(),
                record.verification_code,
                record.proof.hash,
                serde_json::to_string(&record.proof)?,
                record.created_at.timestamp_millis(),
            ],
        )?;

        tracing::debug!("Saved draw {} ({})", record.id, record.verification_code);
        Ok(())
    }

    fn get_draw(&self, id: Uuid) -> Result<DrawRecord> {
        self.query(&format!("{} WHERE id = ?1", SELECT_DRAWS), params![id.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| DrawError::not_found(format!("draw {}", id)))
    }

    fn find_by_code(&self, code: &str) -> Result<Vec<DrawRecord>> {
        self.query(
            &format!(
                "{} WHERE verification_code = ?1 ORDER BY created_at DESC",
                SELECT_DRAWS
            ),
            params![normalize_code(code)],
        )
    }

    fn find_by_hash_prefix(&self, prefix: &str) -> Result<Vec<DrawRecord>> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DrawError::invalid_input(format!(
                "hash prefix '{}' must be hexadecimal",
                prefix
            )));
        }

        self.query(
            &format!(
                "{} WHERE hash LIKE ?1 || '%' ORDER BY created_at DESC",
                SELECT_DRAWS
            ),
            params![prefix],
        )
    }

    fn list_draws(&self, limit: usize) -> Result<Vec<DrawRecord>> {
        self.query(
            &format!("{} ORDER BY created_at DESC LIMIT ?1", SELECT_DRAWS),
            params![limit as i64],
        )
    }

    fn delete_draw(&self, id: Uuid) -> Result<bool> {
        let conn = self.storage.get_connection();
        let removed = conn.execute("DELETE FROM draws WHERE id = ?1", params![id.to_string()])?;
        Ok(removed > 0)
    }

    fn clear_draws(&self) -> Result<usize> {
        let conn = self.storage.get_connection();
        let removed = conn.execute("DELETE FROM draws", [])?;
        tracing::info!("Cleared {} draws from history", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{NamesConfig, NumbersConfig};
    use crate::config::EngineConfig;
    use crate::engine::LotteryEngine;
    use crate::seed::FixedEntropy;
    use crate::types::DrawConfig;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn record_at(minute: u32, config: DrawConfig) -> DrawRecord {
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 10, minute, 0).unwrap();
        let engine = LotteryEngine::with_entropy(
            EngineConfig::default(),
            Arc::new(FixedEntropy::new(now, format!("token{}", minute))),
        )
        .unwrap();
        DrawRecord::from_proof(engine.perform_draw(&config).unwrap().proof).unwrap()
    }

    fn names() -> DrawConfig {
        NamesConfig::new(vec!["A".into(), "B".into(), "C".into()], 1).into()
    }

    #[test]
    fn test_save_and_get() {
        let storage = Storage::in_memory().unwrap();
        let history = storage.draws();
        let record = record_at(1, names());

        history.save_draw(&record).unwrap();
        let loaded = history.get_draw(record.id).unwrap();
        assert_eq!(loaded, record);

        assert!(matches!(
            history.get_draw(Uuid::new_v4()),
            Err(DrawError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_by_code_and_hash() {
        let storage = Storage::in_memory().unwrap();
        let history = storage.draws();
        let record = record_at(2, NumbersConfig::new(1, 6, 2, false).into());
        history.save_draw(&record).unwrap();
        history.save_draw(&record_at(3, names())).unwrap();

        let by_code = history
            .find_by_code(&record.verification_code.to_lowercase())
            .unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].id, record.id);

        let by_hash = history.find_by_hash_prefix(&record.proof.hash[..6]).unwrap();
        assert!(by_hash.iter().any(|r| r.id == record.id));

        assert!(matches!(
            history.find_by_hash_prefix("zz%"),
            Err(DrawError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_newest_first_and_delete() {
        let storage = Storage::in_memory().unwrap();
        let history = storage.draws();
        let older = record_at(4, names());
        let newer = record_at(5, names());
        history.save_draw(&older).unwrap();
        history.save_draw(&newer).unwrap();

        let listed = history.list_draws(10).unwrap();
        assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
        assert_eq!(history.list_draws(1).unwrap().len(), 1);

        assert!(history.delete_draw(older.id).unwrap());
        assert!(!history.delete_draw(older.id).unwrap());
        assert_eq!(history.clear_draws().unwrap(), 1);
        assert!(history.list_draws(10).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_timestamp_is_an_error() {
        let storage = Storage::in_memory().unwrap();
        let history = storage.draws();
        let record = record_at(4, names());
        history.save_draw(&record).unwrap();

        storage
            .get_connection()
            .execute("UPDATE draws SET created_at = ?1", params![i64::MAX])
            .unwrap();

        assert!(matches!(history.get_draw(record.id), Err(DrawError::Internal(_))));
        assert!(matches!(history.list_draws(10), Err(DrawError::Internal(_))));
    }
}
