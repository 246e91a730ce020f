//! Receipt persistence.
//!
//! Stores are plain data holders: they keep the normalized receipt together
//! with its page references and raw text and apply no business rules.

mod json;
mod memory;

pub use json::JsonReceiptStore;
pub use memory::MemoryReceiptStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::models::receipt::Receipt;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A persisted receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReceipt {
    /// Store-assigned identifier.
    pub id: String,

    pub created_at: DateTime<Utc>,

    /// User-defined folder, if the receipt was filed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// References to the captured page images or files, in capture order.
    #[serde(default)]
    pub image_refs: Vec<String>,

    /// Aggregated text the receipt was extracted from.
    #[serde(default)]
    pub raw_text: String,

    pub receipt: Receipt,
}

/// Create/read/update/delete access to stored receipts.
pub trait ReceiptStore: Send + Sync {
    /// Persist a new receipt and return it with its assigned id.
    fn save(&self, receipt: Receipt, image_refs: Vec<String>, raw_text: String)
        -> Result<StoredReceipt>;

    /// Fetch one receipt.
    fn get(&self, id: &str) -> Result<StoredReceipt>;

    /// Replace an existing receipt.
    fn update(&self, stored: &StoredReceipt) -> Result<()>;

    /// Remove a receipt.
    fn delete(&self, id: &str) -> Result<()>;

    /// All receipts, newest first.
    fn list(&self) -> Result<Vec<StoredReceipt>>;

    /// Receipts filed under `folder`, newest first.
    fn list_in_folder(&self, folder: &str) -> Result<Vec<StoredReceipt>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.folder.as_deref() == Some(folder))
            .collect())
    }

    /// File a receipt under a folder, or take it out of one with `None`.
    fn move_to_folder(&self, id: &str, folder: Option<&str>) -> Result<StoredReceipt> {
        let mut stored = self.get(id)?;
        stored.folder = folder.map(str::to_string);
        self.update(&stored)?;
        Ok(stored)
    }
}

/// Identifier derived from the creation time, e.g. `20240315-103112-123`.
fn timestamp_id(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d-%H%M%S-%3f").to_string()
}

fn newest_first(receipts: &mut [StoredReceipt]) {
    receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}
