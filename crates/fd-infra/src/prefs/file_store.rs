use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use fd_core::list::ColumnPrefs;
use fd_core::ports::ColumnPrefsPort;
use tracing::warn;

type PrefsDocument = BTreeMap<String, ColumnPrefs>;

/// Column preferences of every list page in one JSON file, keyed by storage
/// key.
pub struct FileColumnPrefsStore {
    path: PathBuf,
    /// Serialises read-modify-write cycles of this process.
    write_lock: Mutex<()>,
}

impl FileColumnPrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty document.
    fn read_document(&self) -> Result<PrefsDocument> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PrefsDocument::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("read column prefs failed: {}", self.path.display())
                })
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("parse column prefs failed: {}", self.path.display()))
    }

    /// Write to a sibling temp file, then rename over the target.
    fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create prefs dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("write temp prefs failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "rename temp prefs to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })
    }
}

impl ColumnPrefsPort for FileColumnPrefsStore {
    fn load(&self, storage_key: &str) -> Result<Option<ColumnPrefs>> {
        Ok(self.read_document()?.remove(storage_key))
    }

    fn save(&self, storage_key: &str, prefs: &ColumnPrefs) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Replacing unreadable column prefs file");
                PrefsDocument::new()
            }
        };
        document.insert(storage_key.to_string(), prefs.clone());

        let content =
            serde_json::to_string_pretty(&document).context("serialize column prefs failed")?;
        self.atomic_write(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn prefs(visible: &[&str]) -> ColumnPrefs {
        ColumnPrefs {
            visible: visible.iter().map(|s| s.to_string()).collect(),
            order: visible.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_file_means_no_prefs() {
        let dir = TempDir::new().unwrap();
        let store = FileColumnPrefsStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load("customers-list").unwrap(), None);
    }

    #[test]
    fn test_save_keeps_other_lists() {
        let dir = TempDir::new().unwrap();
        let store = FileColumnPrefsStore::new(dir.path().join("nested").join("prefs.json"));

        store.save("customers-list", &prefs(&["name"])).unwrap();
        store.save("partners-list", &prefs(&["email"])).unwrap();

        assert_eq!(store.load("customers-list").unwrap(), Some(prefs(&["name"])));
        assert_eq!(store.load("partners-list").unwrap(), Some(prefs(&["email"])));
        assert!(!dir.path().join("nested").join("prefs.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_fails_load_and_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileColumnPrefsStore::new(&path);

        assert!(store.load("customers-list").is_err());

        store.save("customers-list", &prefs(&["name"])).unwrap();
        assert_eq!(store.load("customers-list").unwrap(), Some(prefs(&["name"])));
    }
}
