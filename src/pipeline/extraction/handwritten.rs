//! Line-oriented parser for handwritten vitals logs.
//!
//! Each line is expected to look like `"<name> 150/95 72 stable"` — a name,
//! a BP-slash reading, an optional pulse, optional notes. Lines that do not
//! fit are silently dropped; they are headers, ruled lines, or OCR debris,
//! not errors.

use std::sync::LazyLock;

use regex::Regex;

use super::clinical;
use super::timestamp_now;
use crate::models::VitalsRow;

/// Plausible reading bounds. These reject OCR misreads and keep
/// coincidental slash-separated numbers (dates, fractions) from becoming
/// rows. The lower systolic bound is looser than the printed extractor's
/// slash fallback (60 vs 80) — kept divergent on purpose.
const SYSTOLIC_RANGE: std::ops::RangeInclusive<i32> = 60..=250;
const DIASTOLIC_RANGE: std::ops::RangeInclusive<i32> = 40..=150;

/// Minimum trimmed line length worth inspecting.
const MIN_LINE_LEN: usize = 5;

static BP_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})[/|\\](\d{2,3})").expect("valid regex"));

/// First standalone 2-3-digit number after the BP token: the pulse.
static PULSE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{2,3})\b").expect("valid regex"));

/// First run of 4+ letters after the pulse: free-text notes.
static NOTES_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{4,}").expect("valid regex"));

static LEADING_NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^A-Za-z]+").expect("valid regex"));

static TRAILING_NON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z\s.\-]+$").expect("valid regex"));

/// Measurements pulled from one line, before status/timestamp stamping.
#[derive(Debug, PartialEq, Eq)]
struct LineReading {
    name: String,
    systolic: i32,
    diastolic: i32,
    pulse: Option<i32>,
    notes: String,
}

/// Parse one line of the log. None means the line holds no vitals row.
fn parse_line(line: &str) -> Option<LineReading> {
    let line = line.trim();
    if line.len() < MIN_LINE_LEN {
        return None;
    }

    let caps = BP_TOKEN.captures(line)?;
    let bp = caps.get(0).expect("whole match");
    let systolic: i32 = caps[1].parse().ok()?;
    let diastolic: i32 = caps[2].parse().ok()?;
    if !SYSTOLIC_RANGE.contains(&systolic) || !DIASTOLIC_RANGE.contains(&diastolic) {
        return None;
    }

    let after_bp = &line[bp.end()..];
    let pulse_match = PULSE_TOKEN.find(after_bp);
    let pulse = pulse_match.and_then(|m| m.as_str().parse::<i32>().ok());

    let before_bp = &line[..bp.start()];
    let name = LEADING_NON_LETTER.replace(before_bp, "");
    let name = TRAILING_NON_NAME.replace(name.trim(), "");
    let name = name.trim();
    if name.len() < 2 {
        return None;
    }

    let notes = pulse_match
        .and_then(|m| NOTES_TOKEN.find(after_bp[m.end()..].trim()))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    Some(LineReading {
        name: name.to_string(),
        systolic,
        diastolic,
        pulse,
        notes,
    })
}

/// Extract vitals rows from classified handwritten text.
///
/// Lazy and restartable: one pass over the lines, each line independent,
/// row order matching input line order. Rows come out fully stamped
/// (BP status, empty sugar status, extraction-time timestamp).
pub fn extract(text: &str) -> impl Iterator<Item = VitalsRow> + '_ {
    text.lines().filter_map(|line| {
        let reading = parse_line(line)?;
        let systolic = reading.systolic.to_string();
        let diastolic = reading.diastolic.to_string();
        let bp_status = clinical::bp_status(Some(&systolic), Some(&diastolic));
        Some(VitalsRow {
            patient_name: reading.name,
            systolic_bp: systolic,
            diastolic_bp: diastolic,
            pulse: reading.pulse.map(|p| p.to_string()),
            notes: reading.notes,
            bp_status,
            sugar_status: String::new(),
            timestamp: timestamp_now(),
        })
    })
}
