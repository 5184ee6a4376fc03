use crate::list::ColumnPrefs;

/// Storage of per-list column preferences.
///
/// Synchronous on purpose: list pages read it once when they are created and
/// write it on every column change.
pub trait ColumnPrefsPort: Send + Sync {
    /// `Ok(None)` when nothing was stored for `storage_key`.
    fn load(&self, storage_key: &str) -> anyhow::Result<Option<ColumnPrefs>>;

    fn save(&self, storage_key: &str, prefs: &ColumnPrefs) -> anyhow::Result<()>;
}
