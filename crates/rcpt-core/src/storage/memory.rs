//! In-memory receipt store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use super::{newest_first, ReceiptStore, Result, StoredReceipt};
use crate::error::StorageError;
use crate::models::receipt::Receipt;

/// Receipt store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryReceiptStore {
    receipts: Mutex<Vec<StoredReceipt>>,
    next_id: AtomicUsize,
}

impl MemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored receipts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredReceipt>> {
        self.receipts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReceiptStore for MemoryReceiptStore {
    fn save(
        &self,
        receipt: Receipt,
        image_refs: Vec<String>,
        raw_text: String,
    ) -> Result<StoredReceipt> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = StoredReceipt {
            id: format!("r{}", id),
            created_at: Utc::now(),
            folder: None,
            image_refs,
            raw_text,
            receipt,
        };
        self.lock().push(stored.clone());
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<StoredReceipt> {
        self.lock()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn update(&self, stored: &StoredReceipt) -> Result<()> {
        let mut receipts = self.lock();
        let slot = receipts
            .iter_mut()
            .find(|r| r.id == stored.id)
            .ok_or_else(|| StorageError::NotFound(stored.id.clone()))?;
        *slot = stored.clone();
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut receipts = self.lock();
        let before = receipts.len();
        receipts.retain(|r| r.id != id);
        if receipts.len() == before {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<StoredReceipt>> {
        let mut receipts = self.lock().clone();
        newest_first(&mut receipts);
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud() {
        let store = MemoryReceiptStore::new();
        let saved = store
            .save(Receipt::default(), vec!["p1.txt".to_string()], "TEXT".to_string())
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&saved.id).unwrap().raw_text, "TEXT");

        let moved = store.move_to_folder(&saved.id, Some("Work")).unwrap();
        assert_eq!(moved.folder.as_deref(), Some("Work"));
        assert_eq!(store.list_in_folder("Work").unwrap().len(), 1);
        assert!(store.list_in_folder("Home").unwrap().is_empty());

        store.delete(&saved.id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.get(&saved.id), Err(StorageError::NotFound(_))));
        assert!(matches!(store.delete(&saved.id), Err(StorageError::NotFound(_))));
    }
}
