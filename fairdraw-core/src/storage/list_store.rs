use crate::error::{DrawError, Result};
use crate::storage::{timestamp_from_millis, Storage};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named list of entries reused across draws (class rosters, players, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedList {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ListStore<'a> {
    storage: &'a Storage,
}

type RawList = (String, String, String, i64, i64);

impl<'a> ListStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the list, or replace the items of an existing list with the
    /// same name.
    pub fn save_list(&self, name: &str, items: &[String]) -> Result<SavedList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DrawError::invalid_input("list name cannot be empty"));
        }

        let items: Vec<String> = items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            return Err(DrawError::invalid_input(format!(
                "list '{}' needs at least one item",
                name
            )));
        }

        let now = Utc::now().timestamp_millis();
        {
            let conn = self.storage.get_connection();
            conn.execute(
                "INSERT INTO lists (id, name, items, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(name) DO UPDATE SET items = excluded.items, updated_at = excluded.updated_at",
                params![
                    Uuid::new_v4().to_string(),
                    name,
                    serde_json::to_string(&items)?,
                    now,
                ],
            )?;
        }

        tracing::info!("Saved list '{}' with {} items", name, items.len());
        self.load_list(name)
    }

    pub fn load_list(&self, name: &str) -> Result<SavedList> {
        let conn = self.storage.get_connection();

        let raw: Option<RawList> = conn
            .query_row(
                "SELECT id, name, items, created_at, updated_at FROM lists WHERE name = ?1",
                params![name.trim()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;

        match raw {
            Some(raw) => Self::to_list(raw),
            None => Err(DrawError::not_found(format!("list '{}'", name.trim()))),
        }
    }

    pub fn list_lists(&self) -> Result<Vec<SavedList>> {
        let conn = self.storage.get_connection();

        let mut stmt = conn.prepare(
            "SELECT id, name, items, created_at, updated_at FROM lists ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?;

        let mut lists = Vec::new();
        for row in rows {
            lists.push(Self::to_list(row?)?);
        }

        Ok(lists)
    }

    pub fn delete_list(&self, name: &str) -> Result<bool> {
        let conn = self.storage.get_connection();
        let removed = conn.execute("DELETE FROM lists WHERE name = ?1", params![name.trim()])?;
        Ok(removed > 0)
    }

    fn to_list((id, name, items, created_at, updated_at): RawList) -> Result<SavedList> {
        Ok(SavedList {
            id: Uuid::parse_str(&id)
                .map_err(|e| DrawError::internal(format!("Invalid list id '{}': {}", id, e)))?,
            name,
            items: serde_json::from_str(&items)?,
            created_at: timestamp_from_millis(created_at, "created_at")?,
            updated_at: timestamp_from_millis(updated_at, "updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_save_and_load() {
        let storage = Storage::in_memory().unwrap();
        let lists = storage.lists();

        let saved = lists
            .save_list(" class 4b ", &items(&["Ada", " Grace ", "", "Linus"]))
            .unwrap();
        assert_eq!(saved.name, "class 4b");
        assert_eq!(saved.items, items(&["Ada", "Grace", "Linus"]));
        assert_eq!(lists.load_list("class 4b").unwrap(), saved);
    }

    #[test]
    fn test_resave_keeps_identity() {
        let storage = Storage::in_memory().unwrap();
        let lists = storage.lists();

        let first = lists.save_list("team", &items(&["a", "b"])).unwrap();
        let second = lists.save_list("team", &items(&["c"])).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.items, items(&["c"]));
        assert_eq!(lists.list_lists().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_and_invalid() {
        let storage = Storage::in_memory().unwrap();
        let lists = storage.lists();

        assert!(matches!(lists.load_list("nope"), Err(DrawError::NotFound(_))));
        assert!(matches!(
            lists.save_list("  ", &items(&["a"])),
            Err(DrawError::InvalidInput(_))
        ));
        assert!(matches!(
            lists.save_list("empty", &items(&[" "])),
            Err(DrawError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_and_delete() {
        let storage = Storage::in_memory().unwrap();
        let lists = storage.lists();
        lists.save_list("zeta", &items(&["1"])).unwrap();
        lists.save_list("alpha", &items(&["2"])).unwrap();

        let names: Vec<String> = lists.list_lists().unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        assert!(lists.delete_list("alpha").unwrap());
        assert!(!lists.delete_list("alpha").unwrap());
        assert_eq!(lists.list_lists().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_timestamp_is_an_error() {
        let storage = Storage::in_memory().unwrap();
        let lists = storage.lists();
        lists.save_list("roster", &items(&["a", "b"])).unwrap();

        storage
            .get_connection()
            .execute("UPDATE lists SET updated_at = ?1", params![i64::MIN])
            .unwrap();

        assert!(matches!(lists.load_list("roster"), Err(DrawError::Internal(_))));
        assert!(matches!(lists.list_lists(), Err(DrawError::Internal(_))));
    }
}
