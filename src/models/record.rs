use serde::{Deserialize, Serialize};

/// Spreadsheet column order. Every persisted row is normalized to exactly
/// these 13 cells; absent fields become empty cells at this boundary only.
pub const SHEET_COLUMNS: [&str; 13] = [
    "Timestamp",
    "Patient Name",
    "Age",
    "Gender",
    "Height (cm)",
    "Weight (kg)",
    "BMI",
    "Systolic BP",
    "Diastolic BP",
    "BP Status",
    "Fasting Sugar (mg/dL)",
    "Post Prandial Sugar (mg/dL)",
    "Sugar Status",
];

/// Timestamp format stamped on every extracted record (process clock).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Structured output of one printed-report extraction.
///
/// Every measurement is `Option<String>`: `None` is the explicit "absent"
/// state after a field's whole fallback chain failed, and is never collapsed
/// into an empty string or a zero. Status fields are derived strings and may
/// legitimately be empty ("insufficient data"), which is distinct from
/// absence of a measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFields {
    #[serde(rename = "Patient Name")]
    pub patient_name: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Height (cm)")]
    pub height_cm: Option<String>,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: Option<String>,
    #[serde(rename = "BMI")]
    pub bmi: Option<String>,
    #[serde(rename = "Systolic BP")]
    pub systolic_bp: Option<String>,
    #[serde(rename = "Diastolic BP")]
    pub diastolic_bp: Option<String>,
    #[serde(rename = "BP Status")]
    pub bp_status: String,
    #[serde(rename = "Fasting Sugar (mg/dL)")]
    pub fasting_sugar: Option<String>,
    #[serde(rename = "Post Prandial Sugar (mg/dL)")]
    pub pp_sugar: Option<String>,
    #[serde(rename = "Sugar Status")]
    pub sugar_status: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

/// Normalize a reviewed row to the 13-column sheet schema.
///
/// The review UI round-trips extraction records as JSON objects keyed by
/// column name; this is the single point where they are coerced to the
/// sheet's shape. Missing or null columns become empty cells, non-string
/// scalars are stringified, and keys outside the schema (pulse, notes) are
/// dropped — the sheet has no columns for them. `None` for a non-object.
pub fn normalize_sheet_row(row: &serde_json::Value) -> Option<serde_json::Value> {
    let source = row.as_object()?;
    let mut cells = serde_json::Map::with_capacity(SHEET_COLUMNS.len());
    for column in SHEET_COLUMNS {
        let cell = match source.get(column) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        cells.insert(column.to_string(), serde_json::Value::String(cell));
    }
    Some(serde_json::Value::Object(cells))
}

/// Structured output of one recognized line in a handwritten vitals table.
///
/// Anthropometric and sugar measurements are absent by construction — a
/// handwritten vitals log never carries them, so the type simply has no such
/// fields. Row normalization emits empty cells in their columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsRow {
    #[serde(rename = "Patient Name")]
    pub patient_name: String,
    #[serde(rename = "Systolic BP")]
    pub systolic_bp: String,
    #[serde(rename = "Diastolic BP")]
    pub diastolic_bp: String,
    #[serde(rename = "Pulse / PR (bpm)")]
    pub pulse: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "BP Status")]
    pub bp_status: String,
    /// Always empty — no sugar readings exist in a vitals log.
    #[serde(rename = "Sugar Status")]
    pub sugar_status: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_report_row_covers_every_column() {
        let fields = ReportFields {
            patient_name: Some("MD.SAZID AVI".into()),
            age: Some("45".into()),
            bp_status: "Normal".into(),
            timestamp: "10/05/2024 09:30:00".into(),
            ..Default::default()
        };
        let raw = serde_json::to_value(&fields).unwrap();
        let row = normalize_sheet_row(&raw).unwrap();
        let cells = row.as_object().unwrap();
        assert_eq!(cells.len(), SHEET_COLUMNS.len());
        assert_eq!(cells["Timestamp"], "10/05/2024 09:30:00");
        assert_eq!(cells["Patient Name"], "MD.SAZID AVI");
        assert_eq!(cells["Age"], "45");
        // Absent gender becomes an empty cell only at the sheet boundary
        assert_eq!(cells["Gender"], "");
        assert_eq!(cells["BP Status"], "Normal");
    }

    #[test]
    fn normalized_vitals_row_drops_pulse_and_fills_sugar_columns() {
        let row = VitalsRow {
            patient_name: "John Doe".into(),
            systolic_bp: "150".into(),
            diastolic_bp: "95".into(),
            pulse: Some("72".into()),
            notes: "stable".into(),
            bp_status: "High".into(),
            sugar_status: String::new(),
            timestamp: "01/01/2025 12:00:00".into(),
        };
        let raw = serde_json::to_value(&row).unwrap();
        let normalized = normalize_sheet_row(&raw).unwrap();
        let cells = normalized.as_object().unwrap();
        assert_eq!(cells.len(), 13);
        assert_eq!(cells["Systolic BP"], "150");
        assert_eq!(cells["Diastolic BP"], "95");
        assert_eq!(cells["BP Status"], "High");
        // Pulse and notes have no sheet columns
        assert!(cells.get("Pulse / PR (bpm)").is_none());
        assert!(cells.get("Notes").is_none());
        // Anthropometric and sugar columns are structurally empty
        for column in ["Age", "Gender", "Height (cm)", "Weight (kg)", "BMI"] {
            assert_eq!(cells[column], "", "column {column} should be empty");
        }
        assert_eq!(cells["Fasting Sugar (mg/dL)"], "");
        assert_eq!(cells["Post Prandial Sugar (mg/dL)"], "");
    }

    #[test]
    fn normalize_stringifies_scalars_and_rejects_non_objects() {
        let raw = serde_json::json!({
            "Patient Name": "Jane",
            "Age": 45,
            "BMI": serde_json::Value::Null,
        });
        let cells = normalize_sheet_row(&raw).unwrap();
        assert_eq!(cells["Age"], "45");
        assert_eq!(cells["BMI"], "");

        assert!(normalize_sheet_row(&serde_json::json!(["a", "b"])).is_none());
        assert!(normalize_sheet_row(&serde_json::json!("row")).is_none());
    }

    #[test]
    fn report_fields_serialize_with_sheet_key_names() {
        let fields = ReportFields {
            fasting_sugar: Some("178".into()),
            sugar_status: "Fasting: Diabetic".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["Fasting Sugar (mg/dL)"], "178");
        assert_eq!(json["Sugar Status"], "Fasting: Diabetic");
        // Absence survives the wire as null, never as ""
        assert!(json["Patient Name"].is_null());
    }
}
