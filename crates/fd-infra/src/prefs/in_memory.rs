use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use fd_core::list::ColumnPrefs;
use fd_core::ports::ColumnPrefsPort;

/// Preferences kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryColumnPrefsStore {
    entries: Mutex<HashMap<String, ColumnPrefs>>,
}

impl InMemoryColumnPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColumnPrefsPort for InMemoryColumnPrefsStore {
    fn load(&self, storage_key: &str) -> anyhow::Result<Option<ColumnPrefs>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(storage_key).cloned())
    }

    fn save(&self, storage_key: &str, prefs: &ColumnPrefs) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(storage_key.to_string(), prefs.clone());
        Ok(())
    }
}
