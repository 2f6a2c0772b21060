//! YAML export, the primary output format.

use crate::formatters::ExportError;
use crate::models::GapRecord;

/// Serialize gap records to a YAML document
pub fn to_yaml(records: &[GapRecord]) -> Result<String, ExportError> {
    Ok(serde_yaml::to_string(records)?)
}

/// Parse a YAML document back into gap records
pub fn from_yaml(input: &str) -> Result<Vec<GapRecord>, ExportError> {
    Ok(serde_yaml::from_str(input)?)
}
