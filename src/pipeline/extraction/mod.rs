pub mod classify;
pub mod clinical;
pub mod compress;
pub mod fields;
pub mod handwritten;
pub mod ocr;
pub mod orchestrator;
pub mod printed;
pub mod sanitize;

pub use ocr::{MockOcrEngine, OcrEngine, OcrSpaceClient};
pub use orchestrator::{extract_all, extract_document, RawDocument};

use chrono::Local;
use thiserror::Error;

use crate::models::TIMESTAMP_FORMAT;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Image decoding failed: {0}")]
    ImageDecoding(String),

    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),

    #[error("OCR request failed: {0}")]
    OcrRequest(String),

    #[error("OCR provider error: {0}")]
    OcrProcessing(String),
}

/// Extraction-time timestamp from the process clock. Every emitted record
/// carries one; document content never supplies it.
pub(crate) fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
