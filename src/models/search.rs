//! Search request/response models and the pipeline report.

use serde::{Deserialize, Serialize};

use crate::models::{GapRecord, PaperRecord};

/// Search query parameters passed to each source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Validated topic string
    pub topic: String,

    /// Maximum number of results to request per source
    pub max_results: usize,
}

impl SearchQuery {
    /// Create a new search query with the default result cap
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            max_results: 5,
        }
    }

    /// Set maximum results per source
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// Search response from one source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Normalized papers
    pub papers: Vec<PaperRecord>,

    /// Source the results came from
    pub source: String,

    /// Topic that was searched
    pub topic: String,

    /// Total result count reported by the API (may exceed returned papers)
    pub total_results: Option<usize>,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(
        papers: Vec<PaperRecord>,
        source: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            papers,
            source: source.into(),
            topic: topic.into(),
            total_results: None,
        }
    }

    /// Set the total result count
    pub fn total_results(mut self, total: usize) -> Self {
        self.total_results = Some(total);
        self
    }
}

/// Outcome status of a full pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntStatus {
    /// Primary sources produced results
    Ok,
    /// All primaries came up empty; results came from the fallback scraper
    Fallback,
    /// Neither primaries nor fallback produced usable papers
    InsufficientData,
}

/// Result of one topic query: gap records plus how the run went
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntReport {
    /// Topic after validation/truncation
    pub topic: String,

    /// How the run concluded
    pub status: HuntStatus,

    /// Gap suggestions, one per surviving paper
    pub records: Vec<GapRecord>,
}

impl HuntReport {
    /// Report for a run that found no usable papers anywhere
    pub fn insufficient(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            status: HuntStatus::InsufficientData,
            records: Vec::new(),
        }
    }

    /// Whether the run produced any suggestions
    pub fn has_results(&self) -> bool {
        !self.records.is_empty()
    }
}
