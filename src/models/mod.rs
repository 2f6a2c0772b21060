//! Core data models for papers, gap suggestions, and search operations.

mod gap;
mod paper;
mod search;

pub use gap::{GapRecord, RETHINK_NOTE};
pub use paper::{PaperBuilder, PaperRecord, SourceType, DATA_UNAVAILABLE};
pub use search::{HuntReport, HuntStatus, SearchQuery, SearchResponse};
