//! Save boundary between the in-memory store and a [`KeyValueStore`].
//!
//! The whole store is written as one JSON document under [`STATE_KEY`].
//! Writes are skipped while the store is clean and are rate-limited by the
//! save interval unless flushed. Failures are logged and leave the store
//! dirty so the next save tries again; nothing is queued.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::store::{FocusStore, StoreSnapshot};

pub const STATE_KEY: &str = "state";

pub struct Persister<S> {
    backend: S,
    save_interval: Duration,
    last_save: Option<Instant>,
}

impl<S: KeyValueStore> Persister<S> {
    pub fn new(backend: S, save_interval: Duration) -> Self {
        Self {
            backend,
            save_interval,
            last_save: None,
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the stored state. Missing state yields a fresh store; unreadable
    /// state is logged and replaced by a fresh store.
    pub fn load(&self) -> FocusStore {
        let value = match self.backend.get(STATE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("no stored state, starting fresh");
                return FocusStore::new();
            }
            Err(e) => {
                warn!(error = %e, "failed to read stored state, starting fresh");
                return FocusStore::new();
            }
        };
        match serde_json::from_value::<StoreSnapshot>(value) {
            Ok(snapshot) => FocusStore::from_snapshot(snapshot),
            Err(e) => {
                warn!(error = %e, "stored state is corrupted, starting fresh");
                FocusStore::new()
            }
        }
    }

    /// Write if dirty and the save interval has passed since the last write.
    /// Returns true if a write happened.
    pub fn save(&mut self, store: &mut FocusStore) -> bool {
        let due = self
            .last_save
            .map_or(true, |last| last.elapsed() >= self.save_interval);
        if !due {
            return false;
        }
        self.flush(store)
    }

    /// Write now if dirty. Returns true if a write happened.
    pub fn flush(&mut self, store: &mut FocusStore) -> bool {
        if !store.is_dirty() {
            return false;
        }
        let value = match serde_json::to_value(store.to_snapshot()) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to serialize state");
                return false;
            }
        };
        match self.backend.set(STATE_KEY, &value) {
            Ok(()) => {
                store.mark_saved();
                self.last_save = Some(Instant::now());
                debug!("state saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to persist state; continuing unsaved");
                false
            }
        }
    }
}
