mod config;
pub mod database;
pub mod keypath;
mod memory;
mod persister;

pub use config::{Config, ExportConfig, StorageConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use persister::{Persister, STATE_KEY};

use std::path::PathBuf;

use serde_json::Value;

use crate::error::StorageError;

/// Namespaced key-value persistence consumed by the store.
///
/// Values are JSON documents; a missing key reads as `None`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSBOARD_DATA_DIR` wins when set. Otherwise `~/.config/focusboard`, or
/// `~/.config/focusboard-dev` with `FOCUSBOARD_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSBOARD_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusboard-dev")
            } else {
                base_dir.join("focusboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
