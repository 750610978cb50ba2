//! Per-document extraction pipeline: classify → route → derive clinical
//! status → stamp timestamp.
//!
//! Documents are independent: no shared state, no ordering dependency, and
//! a failure in one never aborts its siblings.

use super::{classify, clinical, handwritten, printed, timestamp_now};
use crate::models::{DocumentKind, ExtractionOutcome};

/// One OCR'd document: raw text plus the originating filename. The filename
/// is carried for reporting only; extraction reads nothing but the text.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// Run the full extraction pipeline over one document.
pub fn extract_document(doc: &RawDocument) -> ExtractionOutcome {
    match classify::classify(&doc.text) {
        DocumentKind::Handwritten => {
            let rows: Vec<_> = handwritten::extract(&doc.text).collect();
            tracing::debug!(
                filename = %doc.filename,
                rows = rows.len(),
                "handwritten extraction"
            );
            if rows.is_empty() {
                // Classified handwritten but nothing parsed — distinct from
                // "not handwritten", which routes to the printed extractor.
                ExtractionOutcome::Failed {
                    reason: "Could not parse handwritten table rows".to_string(),
                }
            } else {
                ExtractionOutcome::Handwritten { rows }
            }
        }
        DocumentKind::Printed => {
            let mut fields = printed::extract(&doc.text);
            fields.bp_status = clinical::bp_status(
                fields.systolic_bp.as_deref(),
                fields.diastolic_bp.as_deref(),
            );
            fields.sugar_status = clinical::sugar_status(
                fields.fasting_sugar.as_deref(),
                fields.pp_sugar.as_deref(),
            );
            fields.timestamp = timestamp_now();
            tracing::debug!(filename = %doc.filename, fields = ?fields, "printed extraction");
            ExtractionOutcome::Printed { data: fields }
        }
    }
}

/// Extract a batch. One outcome per input document, input order preserved,
/// failures isolated per document.
pub fn extract_all(docs: &[RawDocument]) -> Vec<ExtractionOutcome> {
    docs.iter().map(extract_document).collect()
}
