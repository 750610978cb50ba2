//! In-memory row store for tests and unconfigured deployments.

use std::sync::Mutex;

use super::{AppendReceipt, RowStore, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowStore for MemoryStore {
    fn append(&self, rows: &[serde_json::Value]) -> Result<AppendReceipt, StorageError> {
        let mut stored = self.rows.lock().expect("row store lock poisoned");
        stored.extend(rows.iter().cloned());
        Ok(AppendReceipt {
            accepted: rows.len(),
            total: Some(stored.len() as u64),
        })
    }

    fn read_all(&self) -> Result<Vec<serde_json::Value>, StorageError> {
        Ok(self.rows.lock().expect("row store lock poisoned").clone())
    }
}
