//! Clinical status derivation from numeric readings.
//!
//! Pure functions over already-extracted strings. A value that fails to
//! parse is "insufficient data", never an error: blood pressure degrades to
//! an empty status, sugar degrades to whichever half did parse.

use serde::{Deserialize, Serialize};

/// Blood-pressure category. Bands are checked in order; the first matching
/// rule wins, so a 200/40 reading is High even though the diastolic alone
/// would be Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BpCategory {
    High,
    Elevated,
    Low,
    Normal,
}

impl BpCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            BpCategory::High => "High",
            BpCategory::Elevated => "Elevated",
            BpCategory::Low => "Low",
            BpCategory::Normal => "Normal",
        }
    }

    /// Classify a parsed systolic/diastolic pair.
    pub fn classify(systolic: i32, diastolic: i32) -> Self {
        if systolic >= 140 || diastolic >= 90 {
            BpCategory::High
        } else if systolic >= 130 || diastolic >= 80 {
            BpCategory::Elevated
        } else if systolic < 90 || diastolic < 60 {
            BpCategory::Low
        } else {
            BpCategory::Normal
        }
    }
}

/// Derive the BP status string from optionally-absent reading strings.
/// Both readings must parse as integers; otherwise the status is empty.
pub fn bp_status(systolic: Option<&str>, diastolic: Option<&str>) -> String {
    let parsed = systolic
        .and_then(|s| s.trim().parse::<i32>().ok())
        .zip(diastolic.and_then(|d| d.trim().parse::<i32>().ok()));
    match parsed {
        Some((s, d)) => BpCategory::classify(s, d).as_str().to_string(),
        None => String::new(),
    }
}

/// Derive the sugar status string. Fasting and post-prandial parse
/// independently; the surviving parts are joined with " | ".
pub fn sugar_status(fasting: Option<&str>, post_prandial: Option<&str>) -> String {
    let mut parts = Vec::new();

    if let Some(fv) = fasting.and_then(|f| f.trim().parse::<f64>().ok()) {
        parts.push(if fv >= 126.0 {
            "Fasting: Diabetic"
        } else if fv >= 100.0 {
            "Fasting: Pre-Diabetic"
        } else {
            "Fasting: Normal"
        });
    }

    if let Some(pv) = post_prandial.and_then(|p| p.trim().parse::<f64>().ok()) {
        parts.push(if pv >= 200.0 {
            "PP: Diabetic"
        } else if pv >= 140.0 {
            "PP: Pre-Diabetic"
        } else {
            "PP: Normal"
        });
    }

    parts.join(" | ")
}
