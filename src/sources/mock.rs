//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{PaperBuilder, PaperRecord, SearchQuery, SearchResponse, SourceType};
use crate::sources::{Source, SourceCapabilities, SourceError};

/// Failure mode a mock source can be armed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Simulate HTTP 429
    RateLimit,
    /// Simulate a connection failure
    Network,
    /// Simulate a non-transient API error
    Api,
}

impl MockFailure {
    fn to_error(self) -> SourceError {
        match self {
            MockFailure::RateLimit => SourceError::RateLimit,
            MockFailure::Network => SourceError::Network("mock network failure".to_string()),
            MockFailure::Api => SourceError::Api("mock API error".to_string()),
        }
    }
}

/// A mock source returning predefined responses or failures
#[derive(Debug)]
pub struct MockSource {
    id: String,
    capabilities: SourceCapabilities,
    papers: Mutex<Vec<PaperRecord>>,
    failure: Mutex<Option<MockFailure>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a primary mock source
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: SourceCapabilities::SEARCH,
            papers: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a fallback mock source
    pub fn fallback(id: impl Into<String>) -> Self {
        Self {
            capabilities: SourceCapabilities::SEARCH | SourceCapabilities::FALLBACK,
            ..Self::new(id)
        }
    }

    /// Arm the mock with papers to return
    pub fn set_papers(&self, papers: Vec<PaperRecord>) {
        *self.papers.lock().unwrap() = papers;
        *self.failure.lock().unwrap() = None;
    }

    /// Arm the mock with a failure mode; every search fails until re-armed
    pub fn set_failure(&self, failure: MockFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    /// Number of times search() was invoked
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn capabilities(&self) -> SourceCapabilities {
        self.capabilities
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = *self.failure.lock().unwrap() {
            return Err(failure.to_error());
        }

        let papers = self.papers.lock().unwrap().clone();
        Ok(SearchResponse::new(papers, self.name(), &query.topic))
    }
}

/// Helper to build a recent, relevant mock paper for tests
pub fn make_paper(title: &str, author: &str, year: u16) -> PaperRecord {
    PaperBuilder::new(title, SourceType::SemanticScholar)
        .author(author)
        .year(year)
        .build()
}
