//! Output formatting for gap records.
//!
//! YAML is the primary export format, JSON the secondary. Key order follows
//! the `GapRecord` struct declaration, so exports are stable and parse back
//! into the same list.

mod json;
mod yaml;

pub use json::{from_json, to_json};
pub use yaml::{from_yaml, to_yaml};

use thiserror::Error;

/// Errors that can occur while serializing or parsing exports
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Yaml,
    Json,
}

/// Serialize records in the requested format
pub fn export(
    records: &[crate::models::GapRecord],
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Yaml => to_yaml(records),
        ExportFormat::Json => to_json(records),
    }
}
