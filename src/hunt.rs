//! The pipeline orchestrator: validate the topic, dispatch the sources,
//! normalize and filter, then run the gap heuristic.

use std::sync::Arc;

use crate::config::Config;
use crate::filter;
use crate::gap;
use crate::models::{HuntReport, HuntStatus, PaperRecord, SearchQuery};
use crate::sources::{
    CoreSource, CrossrefSource, ScholarSource, SemanticScholarSource, Source, SourceError,
    SourceRegistry,
};
use crate::utils::{api_retry_config, deduplicate_papers, validate_topic, with_retry,
    ValidationError};

/// At most this many gap records are produced per query.
pub const MAX_GAP_RECORDS: usize = 5;

/// Errors reported to the caller of [`GapHunter::hunt`]
#[derive(Debug, thiserror::Error)]
pub enum HuntError {
    /// Topic failed validation; no API calls were made
    #[error(transparent)]
    InvalidTopic(#[from] ValidationError),

    /// Source setup failed (HTTP client construction)
    #[error("Failed to initialize sources: {0}")]
    Setup(#[from] SourceError),
}

/// The gap-hunting pipeline
///
/// One `GapHunter` serves any number of queries; each call to
/// [`GapHunter::hunt`] is an independent, stateless run.
#[derive(Debug)]
pub struct GapHunter {
    registry: SourceRegistry,
    config: Config,
}

impl GapHunter {
    /// Build the pipeline with the standard source lineup, wired from the
    /// given configuration
    pub fn new(config: Config) -> Result<Self, HuntError> {
        let mut registry = SourceRegistry::empty();

        let semantic = match config.api_keys.semantic_scholar.clone() {
            Some(key) => SemanticScholarSource::with_api_key(key)?,
            None => SemanticScholarSource::new()?,
        };
        registry.register(Arc::new(semantic));

        let core = match config.api_keys.core.clone() {
            Some(key) => CoreSource::with_api_key(key)?,
            None => CoreSource::new()?,
        };
        registry.register(Arc::new(core));

        let crossref = match config.contact_email.clone() {
            Some(email) => CrossrefSource::with_contact(email)?,
            None => CrossrefSource::new()?,
        };
        registry.register(Arc::new(crossref));

        registry.register(Arc::new(ScholarSource::new()?));

        Ok(Self { registry, config })
    }

    /// Build the pipeline over a caller-supplied registry (used by tests)
    pub fn with_registry(config: Config, registry: SourceRegistry) -> Self {
        Self { registry, config }
    }

    /// The registry in use
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Run the full pipeline for one topic
    ///
    /// Source failures degrade to zero results from that source; only topic
    /// validation produces an error. A run that finds nothing anywhere
    /// returns a report with [`HuntStatus::InsufficientData`].
    pub async fn hunt(&self, topic: &str) -> Result<HuntReport, HuntError> {
        let topic = validate_topic(topic)?;
        let query = SearchQuery::new(&topic).max_results(self.config.max_results);

        tracing::info!(topic = %topic, "searching for research gaps");

        let mut all_papers = Vec::new();
        for source in self.registry.primary() {
            match Self::search_source(source, &query).await {
                Ok(papers) => {
                    tracing::info!(source = source.id(), count = papers.len(), "papers retrieved");
                    all_papers.extend(papers);
                }
                Err(e) => {
                    tracing::warn!(source = source.id(), error = %e, "source skipped");
                }
            }
        }

        let mut status = HuntStatus::Ok;
        if all_papers.is_empty() {
            status = HuntStatus::Fallback;
            if let Some(fallback) = self.registry.fallback() {
                tracing::info!(
                    source = fallback.id(),
                    "primary sources returned nothing, trying fallback"
                );
                match Self::search_source(fallback, &query).await {
                    Ok(papers) => all_papers.extend(papers),
                    Err(e) => {
                        tracing::warn!(source = fallback.id(), error = %e, "fallback failed");
                    }
                }
            }
        }

        let papers = deduplicate_papers(all_papers);
        let papers = filter::recent(papers, self.config.recency_years);
        let papers = filter::relevant(papers, &topic);

        if papers.is_empty() {
            tracing::warn!(topic = %topic, "insufficient data for this topic");
            return Ok(HuntReport::insufficient(topic));
        }

        let records = papers
            .iter()
            .take(MAX_GAP_RECORDS)
            .map(|paper| gap::build_record(paper, &topic))
            .collect();

        Ok(HuntReport {
            topic,
            status,
            records,
        })
    }

    /// Query one source through the retry layer
    async fn search_source(
        source: &Arc<dyn Source>,
        query: &SearchQuery,
    ) -> Result<Vec<PaperRecord>, SourceError> {
        let source = Arc::clone(source);
        let query = query.clone();

        let response = with_retry(api_retry_config(), || {
            let source = Arc::clone(&source);
            let query = query.clone();
            async move { source.search(&query).await }
        })
        .await?;

        Ok(response.papers)
    }
}
