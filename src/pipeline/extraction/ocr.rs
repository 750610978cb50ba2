//! OCR provider client — bytes in, raw text out.
//!
//! The provider is a black box to the extraction core: the core only ever
//! sees the returned text. `OcrEngine` is the seam; `OcrSpaceClient` is the
//! production implementation against the OCR.space HTTP API, and
//! `MockOcrEngine` serves unit tests.

use base64::Engine as _;
use serde::Deserialize;

use super::compress::compress_for_ocr;
use super::ExtractionError;

/// OCR.space parse endpoint.
const OCR_SPACE_URL: &str = "https://api.ocr.space/parse/image";

/// Provider call timeout. OCR on a full-page scan can take a while.
const OCR_TIMEOUT_SECS: u64 = 60;

/// Text extraction from image bytes. Implementations must be Send + Sync so
/// a client can be shared across request handlers.
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8], filename: &str) -> Result<String, ExtractionError>;
}

// ──────────────────────────────────────────────
// OcrSpaceClient
// ──────────────────────────────────────────────

/// Production OCR engine backed by the OCR.space cloud API.
pub struct OcrSpaceClient {
    api_key: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OcrSpaceClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoint(api_key, OCR_SPACE_URL)
    }

    /// Point the client at a non-default endpoint (tests, proxies).
    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(OCR_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            api_key: api_key.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl OcrEngine for OcrSpaceClient {
    fn ocr_image(&self, image_bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
        let original_kb = image_bytes.len() / 1024;
        tracing::info!(filename, original_kb, "OCR request");

        let payload = compress_for_ocr(image_bytes)?;
        if payload.len() != image_bytes.len() {
            tracing::info!(final_kb = payload.len() / 1024, "image compressed for OCR");
        }

        let b64 = base64::engine::general_purpose::STANDARD.encode(payload.as_ref());
        let data_url = format!("data:{};base64,{b64}", mime_for_filename(filename));

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("apikey", self.api_key.as_str()),
                ("base64Image", data_url.as_str()),
                ("language", "eng"),
                ("isTable", "true"),
                ("OCREngine", "2"),
                ("scale", "true"),
                ("detectOrientation", "true"),
            ])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::OcrRequest(format!(
                        "Request timed out after {OCR_TIMEOUT_SECS}s"
                    ))
                } else {
                    ExtractionError::OcrRequest(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::OcrProcessing(format!(
                "provider returned HTTP {status}"
            )));
        }

        let body: OcrSpaceResponse = response
            .json()
            .map_err(|e| ExtractionError::OcrProcessing(format!("malformed response: {e}")))?;
        let text = parsed_text(body)?;
        tracing::debug!(text_len = text.len(), "OCR raw text received");
        Ok(text)
    }
}

/// MIME hint derived from the filename extension; the provider needs it in
/// the data URL. Unknown or missing extensions default to JPEG.
fn mime_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "image/jpeg",
    }
}

// ──────────────────────────────────────────────
// Response shape
// ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OcrSpaceResponse {
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored: bool,
    /// The provider sends either a string or an array of strings here.
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: String,
}

/// Join all pages' parsed text, or surface the provider's error message.
fn parsed_text(body: OcrSpaceResponse) -> Result<String, ExtractionError> {
    if body.is_errored {
        return Err(ExtractionError::OcrProcessing(first_error_message(
            body.error_message.as_ref(),
        )));
    }
    Ok(body
        .parsed_results
        .unwrap_or_default()
        .iter()
        .map(|r| r.parsed_text.as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

fn first_error_message(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .first()
            .and_then(|v| v.as_str())
            .unwrap_or("OCR failed")
            .to_string(),
        _ => "OCR failed".to_string(),
    }
}

// ──────────────────────────────────────────────
// MockOcrEngine (testing)
// ──────────────────────────────────────────────

/// Mock OCR engine returning configured text, for tests that exercise the
/// pipeline without a network.
pub struct MockOcrEngine {
    pub text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8], _filename: &str) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

/// Mock engine that always fails, for error-path tests.
pub struct FailingOcrEngine;

impl OcrEngine for FailingOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8], _filename: &str) -> Result<String, ExtractionError> {
        Err(ExtractionError::OcrProcessing("provider unavailable".into()))
    }
}
