//! Scan endpoint: multipart images in, per-file extraction results out.
//!
//! Accepts one or more files under the `images` field. Each file is
//! OCR'd and routed through the extraction pipeline independently, so
//! one bad scan never sinks the batch.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{DocumentKind, ExtractionOutcome, ReportFields, VitalsRow};
use crate::pipeline::extraction::{extract_document, ExtractionError, OcrEngine, RawDocument};

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub results: Vec<ScanFileResult>,
}

/// Per-file result. Printed scans carry `data`, handwritten scans carry
/// `rows` + `count`, failures carry `error`.
#[derive(Debug, Serialize)]
pub struct ScanFileResult {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<VitalsRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanFileResult {
    fn from_outcome(filename: String, outcome: ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Printed { data } => Self {
                filename,
                success: true,
                mode: Some(DocumentKind::Printed.as_str()),
                data: Some(data),
                rows: None,
                count: None,
                error: None,
            },
            ExtractionOutcome::Handwritten { rows } => {
                let count = rows.len();
                Self {
                    filename,
                    success: true,
                    mode: Some(DocumentKind::Handwritten.as_str()),
                    data: None,
                    rows: Some(rows),
                    count: Some(count),
                    error: None,
                }
            }
            ExtractionOutcome::Failed { reason } => Self::failure(filename, reason),
        }
    }

    fn failure(filename: String, error: String) -> Self {
        Self {
            filename,
            success: false,
            mode: None,
            data: None,
            rows: None,
            count: None,
            error: Some(error),
        }
    }
}

/// `POST /scan` — OCR and extract every uploaded image.
pub async fn scan(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ApiError> {
    let ocr = ctx
        .ocr
        .clone()
        .ok_or(ApiError::NotConfigured("OCR_API_KEY"))?;

    let mut results = Vec::new();
    // The 400 is reserved for a request that never sent the field at all;
    // a field whose parts all lack filenames yields an empty result list.
    let mut saw_images_field = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("images") {
            continue;
        }
        saw_images_field = true;
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        results.push(scan_one(Arc::clone(&ocr), filename, bytes.to_vec()).await?);
    }

    if !saw_images_field {
        return Err(ApiError::BadRequest("No images uploaded".into()));
    }

    Ok(Json(ScanResponse { results }))
}

/// OCR + extract a single upload on the blocking pool. OCR failures
/// become a per-file failure entry rather than an HTTP error.
async fn scan_one(
    ocr: Arc<dyn OcrEngine>,
    filename: String,
    bytes: Vec<u8>,
) -> Result<ScanFileResult, ApiError> {
    if bytes.is_empty() {
        return Ok(ScanFileResult::failure(filename, "Empty file".into()));
    }

    let name = filename.clone();
    let outcome: Result<ExtractionOutcome, ExtractionError> =
        tokio::task::spawn_blocking(move || {
            let text = ocr.ocr_image(&bytes, &name)?;
            Ok(extract_document(&RawDocument::new(&name, &text)))
        })
        .await
        .map_err(|e| ApiError::Internal(format!("extraction task panicked: {e}")))?;

    Ok(match outcome {
        Ok(outcome) => ScanFileResult::from_outcome(filename, outcome),
        Err(e) => {
            tracing::warn!(filename, error = %e, "scan failed");
            ScanFileResult::failure(filename, e.to_string())
        }
    })
}
