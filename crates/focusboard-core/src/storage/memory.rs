use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use super::KeyValueStore;
use crate::error::StorageError;

/// Process-local store. Values are kept as serialized text so reads go
/// through the same decoding path as the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Store raw text, bypassing serialization.
    pub fn set_raw(&self, key: &str, text: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let entries = self.entries.borrow();
        let Some(text) = entries.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(text)
            .map(Some)
            .map_err(|e| StorageError::Corrupted {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.set_raw(key, &value.to_string());
        Ok(())
    }
}
