//! Receipt store keeping one pretty-printed JSON file per receipt.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use super::{newest_first, timestamp_id, ReceiptStore, Result, StoredReceipt};
use crate::error::StorageError;
use crate::models::receipt::Receipt;

/// Directory-backed receipt store (`<dir>/<id>.json`).
#[derive(Debug, Clone)]
pub struct JsonReceiptStore {
    dir: PathBuf,
}

impl JsonReceiptStore {
    /// Open a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    fn write(&self, stored: &StoredReceipt) -> Result<()> {
        let path = self.path_for(&stored.id)?;
        let content = serde_json::to_string_pretty(stored)?;
        fs::write(&path, content)?;
        debug!("Wrote receipt {} to {}", stored.id, path.display());
        Ok(())
    }
}

impl ReceiptStore for JsonReceiptStore {
    fn save(
        &self,
        receipt: Receipt,
        image_refs: Vec<String>,
        raw_text: String,
    ) -> Result<StoredReceipt> {
        fs::create_dir_all(&self.dir)?;

        let created_at = Utc::now();
        let base = timestamp_id(created_at);
        let mut id = base.clone();
        let mut suffix = 1;
        while self.path_for(&id)?.exists() {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        let stored = StoredReceipt {
            id,
            created_at,
            folder: None,
            image_refs,
            raw_text,
            receipt,
        };
        self.write(&stored)?;
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<StoredReceipt> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn update(&self, stored: &StoredReceipt) -> Result<()> {
        if !self.path_for(&stored.id)?.exists() {
            return Err(StorageError::NotFound(stored.id.clone()));
        }
        self.write(stored)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<StoredReceipt>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut receipts = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match fs::read_to_string(&path)
                .map_err(StorageError::from)
                .and_then(|c| serde_json::from_str::<StoredReceipt>(&c).map_err(StorageError::from))
            {
                Ok(stored) => receipts.push(stored),
                Err(e) => warn!("Skipping unreadable receipt {}: {}", path.display(), e),
            }
        }

        newest_first(&mut receipts);
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::PaymentMethod;
    use pretty_assertions::assert_eq;

    fn sample_receipt() -> Receipt {
        Receipt {
            store_name: Some("Fresh Mart".to_string()),
            payment_method: PaymentMethod::Cash,
            ..Default::default()
        }
    }

    #[test]
    fn test_save_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonReceiptStore::new(dir.path().join("receipts"));

        let saved = store
            .save(sample_receipt(), vec!["page1.txt".to_string()], "Fresh Mart".to_string())
            .unwrap();

        let loaded = store.get(&saved.id).unwrap();
        assert_eq!(loaded, saved);
        assert!(store.dir().join(format!("{}.json", saved.id)).exists());
    }

    #[test]
    fn test_ids_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonReceiptStore::new(dir.path());

        let a = store.save(sample_receipt(), vec![], String::new()).unwrap();
        let b = store.save(sample_receipt(), vec![], String::new()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_folders_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonReceiptStore::new(dir.path());

        let saved = store.save(sample_receipt(), vec![], String::new()).unwrap();
        store.move_to_folder(&saved.id, Some("Taxes 2024")).unwrap();

        let filed = store.list_in_folder("Taxes 2024").unwrap();
        assert_eq!(filed.len(), 1);
        assert_eq!(filed[0].receipt.store_name.as_deref(), Some("Fresh Mart"));

        store.delete(&saved.id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.get(&saved.id), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        let store = JsonReceiptStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonReceiptStore::new(dir.path());
        assert!(matches!(store.get("../etc/passwd"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_missing_dir_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonReceiptStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }
}
