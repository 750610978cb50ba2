//! Row persistence behind an Apps Script web app.
//!
//! Extracted rows are stored as JSON objects keyed by sheet column name.
//! `RowStore` is the seam between HTTP handlers and the backing sheet;
//! `MemoryStore` stands in when no script URL is configured or under test.

pub mod memory;
pub mod sheet;

pub use memory::MemoryStore;
pub use sheet::AppsScriptStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend not configured")]
    NotConfigured,

    #[error("Storage request failed: {0}")]
    Http(String),

    #[error("Storage script error: {0}")]
    Script(String),
}

/// Outcome of an append call, echoing the backing script's counters.
#[derive(Debug, Clone)]
pub struct AppendReceipt {
    /// Rows accepted by this call.
    pub accepted: usize,
    /// Total rows the store now holds, when the backend reports it.
    pub total: Option<u64>,
}

/// Append-and-read access to the row store.
pub trait RowStore: Send + Sync {
    fn append(&self, rows: &[serde_json::Value]) -> Result<AppendReceipt, StorageError>;

    fn read_all(&self) -> Result<Vec<serde_json::Value>, StorageError>;
}
