//! Paper-search source plugins with a trait-based architecture.
//!
//! This module defines the [`Source`] trait that all search backends
//! implement. The three primary sources (Semantic Scholar, CORE, Crossref)
//! are dispatched sequentially in registry order; the Google Scholar scraper
//! is registered as a fallback and only consulted when every primary source
//! comes up empty.
//!
//! # Implementing a New Source
//!
//! 1. Create a struct that implements `Source`
//! 2. Implement `id`, `name`, and `search`
//! 3. Register it with [`SourceRegistry::register`]

mod core;
mod crossref;
pub mod mock;
mod registry;
mod scholar;
mod semantic;

pub use self::core::CoreSource;
pub use crossref::CrossrefSource;
pub use mock::MockSource;
pub use registry::{SourceCapabilities, SourceRegistry};
pub use scholar::ScholarSource;
pub use semantic::SemanticScholarSource;

use crate::models::{SearchQuery, SearchResponse};
use async_trait::async_trait;

/// Interface implemented by every paper-search backend
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "semantic", "crossref")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Describe the capabilities of this source
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    /// Whether this source is only consulted when primaries fail
    fn is_fallback(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::FALLBACK)
    }

    /// Search for papers matching the topic
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError>;
}

/// Errors that can occur when querying a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be parsed (JSON, HTML)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Non-success response from the API
    #[error("API error: {0}")]
    Api(String),

    /// Source requires credentials that are not configured
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
