//! Field-by-field extractor for typed key-value lab reports.
//!
//! Handles the real-world layout variants seen in scanned slips:
//!
//! Format A (structured digital report):
//!   `Patient Name: Mohammed Abdul Kareem   Age / Gender: 42 Years / Male`
//!   `Blood Pressure (Systolic)  142 mmHg`
//!   `Fasting Blood Glucose      128 mg/dL`
//!
//! Format B (basic printed lab slip):
//!   `PATIENT NAME : MD.SAZID AVI`
//!   `AGE : 45   SEX : M`
//!   `BLOOD SUGAR (F)  :  178  Mg/dl`
//!
//! Format C (inline key-value):
//!   `Patient Name: XYZ   Age: 35   Gender: Male`
//!   `Systolic BP: 130   Diastolic BP: 85`
//!
//! Each field carries its own ordered fallback chain; variants are tried
//! most-specific first and the first match wins.

use std::sync::LazyLock;

use regex::Regex;

use super::fields::{compile, find_first};
use super::sanitize::clean_name;
use crate::models::ReportFields;

// ── Per-field fallback chains ──────────────────────────────

static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"PATIENT\s*NAME\s*[:\-]\s*([A-Za-z][^\n\r]{1,60})",
        r"Patient\s*Name\s*[:\-]\s*([A-Za-z][^\n\r]{1,60})",
    ])
});

static AGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"AGE\s*[:\-]\s*(\d{1,3})",
        r"Age\s*/\s*Gender[:\s]+(\d{1,3})",
        r"Age[^\d\n]{0,10}(\d{1,3})\s*(?:Years?|Yrs?)",
        r"\b(\d{1,3})\s*(?:Years?|Yrs?)\s*/\s*(?:Male|Female|M\b|F\b)",
    ])
});

static GENDER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"SEX\s*[:\-]\s*([A-Za-z]+)",
        r"Gender\s*[:\-]\s*([A-Za-z]+)",
        r"\d+\s*(?:Years?|Yrs?)?\s*/\s*(Male|Female)",
        r"\b(Male|Female)\b",
    ])
});

static HEIGHT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"Height[:\s]+(\d{2,3})\s*cm",
        r"\bHt\.?\s*[:\-]?\s*(\d{2,3})\s*cm",
    ])
});

static WEIGHT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"Weight[:\s]+(\d{2,3}(?:\.\d)?)\s*kg",
        r"\bWt\.?\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)\s*kg",
    ])
});

static BMI_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"BMI[^\d\n]{0,20}(\d{1,2}\.\d+)"]));

static SYSTOLIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"Blood\s+Pressure\s+\(Systolic\)\s+(\d{2,3})",
        r"Systolic\s*(?:BP|Blood\s*Pressure)?\s*[:\-]?\s*(\d{2,3})",
    ])
});

static DIASTOLIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"Blood\s+Pressure\s+\(Diastolic\)\s+(\d{2,3})",
        r"Diastolic\s*(?:BP|Blood\s*Pressure)?\s*[:\-]?\s*(\d{2,3})",
    ])
});

/// Generic "NNN / NNN [mmHg]" reading — fallback when the labelled
/// systolic/diastolic chains left a gap.
static BP_SLASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{2,3})\s*/\s*(\d{2,3})\s*(?:mmHg|mm\s*Hg)?").expect("valid regex")
});

static FASTING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"BLOOD\s+SUGAR\s*[\(\[]\s*F\s*[\)\]]\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)",
        r"(?:Fasting|FBS|F\.?B\.?S\.?)\s*(?:Blood\s*)?(?:Sugar|Glucose)\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)",
        r"Fasting\s+Blood\s+Glucose\s+(\d{2,3}(?:\.\d)?)",
        r"Fasting\s+Sugar\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)",
    ])
});

static PP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"BLOOD\s+SUGAR\s*[\(\[]\s*PP\s*[\)\]]\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)",
        r"(?:Post\s*Prandial|PPBS|PP\.?B\.?S\.?)\s*(?:Blood\s*)?(?:Sugar|Glucose)?\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)",
        r"Post\s+Prandial\s+Glucose\s+(\d{2,3}(?:\.\d)?)",
        r"Post\s+Prandial\s+Sugar\s*[:\-]?\s*(\d{2,3}(?:\.\d)?)",
    ])
});

// ── BP slash-fallback plausibility bounds ──────────────────
// Tighter lower systolic bound than the handwritten extractor (80 vs 60):
// a typed report quoting an unrelated NN/NN figure is the bigger risk here.
const SLASH_SYSTOLIC_RANGE: std::ops::RangeInclusive<i32> = 80..=250;
const SLASH_DIASTOLIC_RANGE: std::ops::RangeInclusive<i32> = 40..=150;

/// Title-case a free-form gender token ("other" values only; M/F variants
/// are normalized explicitly).
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut start_of_word = true;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if start_of_word {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(ch);
            start_of_word = true;
        }
    }
    out
}

fn normalize_gender(raw: &str) -> String {
    match raw.trim().to_uppercase().as_str() {
        "M" | "MALE" => "Male".to_string(),
        "F" | "FEMALE" => "Female".to_string(),
        _ => title_case(raw),
    }
}

/// Extract the twelve semantic fields from classified printed-report text.
///
/// Status fields and the timestamp are left empty; the orchestrator derives
/// and stamps them.
pub fn extract(text: &str) -> ReportFields {
    let patient_name = find_first(&NAME_PATTERNS, text).map(|raw| clean_name(&raw));
    let age = find_first(&AGE_PATTERNS, text);
    let gender = find_first(&GENDER_PATTERNS, text).map(|g| normalize_gender(&g));
    let height_cm = find_first(&HEIGHT_PATTERNS, text);
    let weight_kg = find_first(&WEIGHT_PATTERNS, text);
    let bmi = find_first(&BMI_PATTERNS, text);

    let mut systolic_bp = find_first(&SYSTOLIC_PATTERNS, text);
    let mut diastolic_bp = find_first(&DIASTOLIC_PATTERNS, text);

    // Slash fallback: only fills fields the labelled chains left absent,
    // and only when both halves look like a real BP reading.
    if systolic_bp.is_none() || diastolic_bp.is_none() {
        if let Some(caps) = BP_SLASH.captures(text) {
            if let (Ok(s), Ok(d)) = (caps[1].parse::<i32>(), caps[2].parse::<i32>()) {
                if SLASH_SYSTOLIC_RANGE.contains(&s) && SLASH_DIASTOLIC_RANGE.contains(&d) {
                    systolic_bp = systolic_bp.or_else(|| Some(s.to_string()));
                    diastolic_bp = diastolic_bp.or_else(|| Some(d.to_string()));
                }
            }
        }
    }

    let fasting_sugar = find_first(&FASTING_PATTERNS, text);
    let pp_sugar = find_first(&PP_PATTERNS, text);

    ReportFields {
        patient_name,
        age,
        gender,
        height_cm,
        weight_kg,
        bmi,
        systolic_bp,
        diastolic_bp,
        bp_status: String::new(),
        fasting_sugar,
        pp_sugar,
        sugar_status: String::new(),
        timestamp: String::new(),
    }
}
