//! JSON export, the secondary output format.

use crate::formatters::ExportError;
use crate::models::GapRecord;

/// Serialize gap records to pretty-printed JSON
pub fn to_json(records: &[GapRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a JSON document back into gap records
pub fn from_json(input: &str) -> Result<Vec<GapRecord>, ExportError> {
    Ok(serde_json::from_str(input)?)
}
