//! Shared state for the HTTP API layer.

use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::extraction::{OcrEngine, OcrSpaceClient};
use crate::storage::{AppsScriptStore, RowStore};

/// Shared context for all API routes.
///
/// OCR and storage are optional: the server starts without them and the
/// affected endpoints degrade per route (503 for scan/save, empty list
/// for records).
#[derive(Clone)]
pub struct ApiContext {
    pub ocr: Option<Arc<dyn OcrEngine>>,
    pub store: Option<Arc<dyn RowStore>>,
    pub sheet_url: Option<String>,
}

impl ApiContext {
    pub fn new(
        ocr: Option<Arc<dyn OcrEngine>>,
        store: Option<Arc<dyn RowStore>>,
        sheet_url: Option<String>,
    ) -> Self {
        Self {
            ocr,
            store,
            sheet_url,
        }
    }

    /// Wire up production clients from the environment config.
    pub fn from_config(config: &Config) -> Self {
        let ocr: Option<Arc<dyn OcrEngine>> = if config.ocr_api_key.is_empty() {
            tracing::warn!("OCR_API_KEY not set, /scan will be unavailable");
            None
        } else {
            Some(Arc::new(OcrSpaceClient::new(&config.ocr_api_key)))
        };

        let store: Option<Arc<dyn RowStore>> = if config.apps_script_url.is_empty() {
            tracing::warn!("APPS_SCRIPT_URL not set, rows will not be persisted");
            None
        } else {
            Some(Arc::new(AppsScriptStore::new(&config.apps_script_url)))
        };

        Self {
            ocr,
            store,
            sheet_url: config.sheet_url(),
        }
    }
}
