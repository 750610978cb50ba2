//! Patient-name cleanup for OCR captures that run on into adjacent fields.
//!
//! Printed slips often lose the delimiter after the name, so a capture like
//! `"MD.SAZID AVI DATE : 10.05.202"` arrives with the next field glued on.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing-field keywords that mark where the name ends. Matched
/// case-insensitively, preceded by whitespace.
static TRAILING_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(?:DATE\s*[:=]|D\.O\.B|DOB\s*[:=]|ID\s*[:=]|AGE\s*[:=]|REF\.|SAMPLE|REPORT)",
    )
    .expect("valid regex")
});

/// Stray date/ID fragments left after truncation: a trailing run of
/// whitespace, digits, colons, periods, slashes, and hyphens.
static TRAILING_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\d:./\-]+$").expect("valid regex"));

/// Strip trailing OCR noise from a raw patient-name capture.
///
/// Idempotent: re-applying to already-clean output yields the same output.
pub fn clean_name(raw: &str) -> String {
    let cut = match TRAILING_FIELD.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    };
    let stripped = TRAILING_JUNK.replace(cut, "");
    stripped.trim().to_string()
}
