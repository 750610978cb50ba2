//! Document classification: typed key-value lab slip vs. handwritten
//! tabular vitals log.
//!
//! Typed slips reliably carry an explicit "Patient Name:" label. Handwritten
//! logs are columns of repeated BP-slash readings with no such label; the
//! token count threshold keeps a single stray BP reading in a typed report
//! from tipping the decision.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::DocumentKind;

/// Minimum number of BP-slash tokens for the handwritten call.
const MIN_BP_TOKENS: usize = 3;

static PATIENT_NAME_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Patient\s*Name\s*:").expect("valid regex"));

/// A BP-shaped token: 2-3 digits, slash (or OCR-misread pipe/backslash),
/// 2-3 digits.
static BP_SLASH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2,3}[/|\\]\d{2,3}").expect("valid regex"));

/// Classify raw OCR text. Pure and deterministic: depends only on content.
pub fn classify(text: &str) -> DocumentKind {
    let has_label = PATIENT_NAME_LABEL.is_match(text);
    let bp_tokens = BP_SLASH_TOKEN.find_iter(text).count();
    if !has_label && bp_tokens >= MIN_BP_TOKENS {
        DocumentKind::Handwritten
    } else {
        DocumentKind::Printed
    }
}
