use serde::{Deserialize, Serialize};

use super::record::{ReportFields, VitalsRow};

/// Document class decided by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Printed,
    Handwritten,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Printed => "printed",
            DocumentKind::Handwritten => "handwritten",
        }
    }
}

/// Result of extracting one document. Created fresh per request; failures
/// are local to the document that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExtractionOutcome {
    /// Typed key-value report — exactly one field set.
    Printed { data: ReportFields },
    /// Handwritten vitals log — one row per recognized line, input order.
    Handwritten { rows: Vec<VitalsRow> },
    /// The document was processed but produced nothing usable.
    Failed { reason: String },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ExtractionOutcome::Failed { .. })
    }
}
