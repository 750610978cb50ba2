use std::env;

/// Application-level constants
pub const APP_NAME: &str = "MedScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum accepted upload size: 10 MB (camera photos of paper reports).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "medscan=info,tower_http=info"
}

/// Process-wide configuration, read once from the environment at startup.
///
/// The extraction core never reads this — it takes raw text as a pure input.
/// Only the OCR client, the row store, and the HTTP server are configured.
#[derive(Debug, Clone)]
pub struct Config {
    /// OCR.space API key. Empty when unset; the scan endpoint rejects
    /// requests with 503 rather than failing at startup.
    pub ocr_api_key: String,
    /// Google Apps Script web-app URL backing the row store.
    pub apps_script_url: String,
    /// Spreadsheet id, used only to build the user-facing sheet URL.
    pub sheet_id: String,
    /// HTTP listen port.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            ocr_api_key: env::var("OCR_API_KEY").unwrap_or_default(),
            apps_script_url: env::var("APPS_SCRIPT_URL").unwrap_or_default(),
            sheet_id: env::var("SHEET_ID").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
        }
    }

    /// User-facing Google Sheets URL, or None when no sheet is configured.
    pub fn sheet_url(&self) -> Option<String> {
        if self.sheet_id.is_empty() {
            None
        } else {
            Some(format!(
                "https://docs.google.com/spreadsheets/d/{}/edit",
                self.sheet_id
            ))
        }
    }
}
