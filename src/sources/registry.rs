//! Registry for managing paper-search source plugins.

use std::sync::Arc;

use super::{
    core::CoreSource, crossref::CrossrefSource, scholar::ScholarSource,
    semantic::SemanticScholarSource, Source, SourceError,
};

bitflags::bitflags! {
    /// Capabilities that a source can support
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceCapabilities: u32 {
        const SEARCH = 1 << 0;
        const FALLBACK = 1 << 1;
    }
}

/// Ordered registry of search sources
///
/// Registration order is the dispatch order, and with keep-first
/// deduplication it also decides which source's record survives a duplicate
/// group. Fallback sources sit in the same list but are skipped by
/// [`SourceRegistry::primary`].
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create a registry with the standard source lineup: Semantic Scholar,
    /// CORE, Crossref, then the Google Scholar fallback
    pub fn new() -> Result<Self, SourceError> {
        let mut registry = Self {
            sources: Vec::new(),
        };

        registry.register(Arc::new(SemanticScholarSource::new()?));
        registry.register(Arc::new(CoreSource::new()?));
        registry.register(Arc::new(CrossrefSource::new()?));
        registry.register(Arc::new(ScholarSource::new()?));

        Ok(registry)
    }

    /// Create an empty registry (tests build their own lineup)
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register a source at the end of the dispatch order
    pub fn register(&mut self, source: Arc<dyn Source>) {
        self.sources.push(source);
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    /// Primary sources in dispatch order
    pub fn primary(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter().filter(|s| !s.is_fallback())
    }

    /// The first registered fallback source, if any
    pub fn fallback(&self) -> Option<&Arc<dyn Source>> {
        self.sources.iter().find(|s| s.is_fallback())
    }

    /// All registered sources in dispatch order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    /// All source IDs in dispatch order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
