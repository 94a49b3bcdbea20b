//! SQLite-backed key-value storage.
//!
//! A single `kv` table keyed by `(namespace, key)` holds JSON documents, so
//! several profiles can share one database file.

use std::path::Path;

use rusqlite::{params, Connection};
use serde_json::Value;

use super::KeyValueStore;
use crate::error::StorageError;

pub struct Database {
    conn: Connection,
    namespace: String,
}

impl Database {
    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path, namespace: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self {
            conn,
            namespace: namespace.to_string(),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory(namespace: &str) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            namespace: namespace.to_string(),
        };
        db.migrate()?;
        Ok(db)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                namespace  TEXT NOT NULL,
                key        TEXT NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            );",
        )?;
        Ok(())
    }

    /// Get the raw text stored under `key`.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE namespace = ?1 AND key = ?2")?;
        let result = stmt.query_row(params![self.namespace, key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store raw text under `key`.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (namespace, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                self.namespace,
                key,
                value,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let Some(text) = self.kv_get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::Corrupted {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.kv_set(key, &value.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kv_store() {
        let db = Database::open_memory("test").unwrap();
        assert!(db.kv_get("greeting").unwrap().is_none());
        db.kv_set("greeting", "hello").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().unwrap(), "hello");
        db.kv_set("greeting", "bye").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().unwrap(), "bye");
    }

    #[test]
    fn json_roundtrip() {
        let db = Database::open_memory("test").unwrap();
        let value = json!({"sessions": [], "streak": {"count": 2}});
        db.set("state", &value).unwrap();
        assert_eq!(db.get("state").unwrap(), Some(value));
    }

    #[test]
    fn corrupted_blob_is_reported() {
        let db = Database::open_memory("test").unwrap();
        db.kv_set("state", "{not json").unwrap();
        assert!(matches!(
            db.get("state"),
            Err(StorageError::Corrupted { .. })
        ));
    }

    #[test]
    fn namespaces_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.db");
        let work = Database::open(&path, "work").unwrap();
        let home = Database::open(&path, "home").unwrap();
        work.set("state", &json!(1)).unwrap();
        assert_eq!(work.get("state").unwrap(), Some(json!(1)));
        assert_eq!(home.get("state").unwrap(), None);
        assert_eq!(home.namespace(), "home");
    }
}
