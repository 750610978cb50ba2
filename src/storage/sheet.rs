//! Google Sheets access through an Apps Script web app.
//!
//! The script owns the sheet; this client only speaks its tiny envelope:
//! POST `{"action": "append", "rows": [...]}` to add rows, GET
//! `?action=read` to fetch everything. Any `status` other than `"ok"`
//! carries an error `message`.

use serde::Deserialize;
use serde_json::json;

use super::{AppendReceipt, RowStore, StorageError};

/// Script call timeout. Apps Script cold starts are slow.
const SCRIPT_TIMEOUT_SECS: u64 = 30;

pub struct AppsScriptStore {
    script_url: String,
    client: reqwest::blocking::Client,
}

impl AppsScriptStore {
    pub fn new(script_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(SCRIPT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            script_url: script_url.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScriptEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

impl ScriptEnvelope {
    fn ensure_ok(self, fallback: &str) -> Result<Self, StorageError> {
        if self.status == "ok" {
            Ok(self)
        } else {
            Err(StorageError::Script(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

impl RowStore for AppsScriptStore {
    fn append(&self, rows: &[serde_json::Value]) -> Result<AppendReceipt, StorageError> {
        tracing::info!(rows = rows.len(), "appending rows to sheet");

        let response = self
            .client
            .post(&self.script_url)
            .json(&json!({ "action": "append", "rows": rows }))
            .send()
            .map_err(|e| StorageError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Http(format!("script returned HTTP {status}")));
        }

        let envelope: ScriptEnvelope = response
            .json()
            .map_err(|e| StorageError::Http(format!("malformed script response: {e}")))?;
        let envelope = envelope.ensure_ok("Apps Script error")?;

        Ok(AppendReceipt {
            accepted: rows.len(),
            total: envelope.total,
        })
    }

    fn read_all(&self) -> Result<Vec<serde_json::Value>, StorageError> {
        let response = self
            .client
            .get(&self.script_url)
            .query(&[("action", "read")])
            .send()
            .map_err(|e| StorageError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Http(format!("script returned HTTP {status}")));
        }

        let envelope: ScriptEnvelope = response
            .json()
            .map_err(|e| StorageError::Http(format!("malformed script response: {e}")))?;
        let envelope = envelope.ensure_ok("Apps Script read error")?;

        Ok(envelope.data.unwrap_or_default())
    }
}
