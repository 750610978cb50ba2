pub mod outcome;
pub mod record;

pub use outcome::{DocumentKind, ExtractionOutcome};
pub use record::{normalize_sheet_row, ReportFields, VitalsRow, SHEET_COLUMNS, TIMESTAMP_FORMAT};
