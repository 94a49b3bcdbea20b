pub mod config;
pub mod goal;
pub mod preset;
pub mod session;
pub mod settings;
pub mod stats;
pub mod timer;
pub mod transfer;

use std::time::Duration;

use chrono::Utc;
use focusboard_core::{Config, Database, Event, FocusStore, Persister};

/// Configuration, storage and the loaded store for one CLI invocation.
pub struct Workspace {
    pub config: Config,
    pub store: FocusStore,
    persister: Persister<Database>,
    /// Events produced while catching the timer up to the current time.
    pub pending: Vec<Event>,
}

impl Workspace {
    /// Load config and state, then apply the ticks missed since the last run.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let db = Database::open(&config.database_path()?, &config.storage.namespace)?;
        let persister = Persister::new(db, Duration::from_secs(config.storage.save_interval_secs));
        let mut store = persister.load();
        let pending = store.catch_up(Utc::now());
        Ok(Self {
            config,
            store,
            persister,
            pending,
        })
    }

    /// Debounced save, for long-running loops.
    pub fn save(&mut self) -> bool {
        self.persister.save(&mut self.store)
    }

    /// Write pending changes. Failures are logged by the persister.
    pub fn close(mut self) {
        self.persister.flush(&mut self.store);
    }
}
