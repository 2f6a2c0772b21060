//! Paper model representing a normalized search result from any source.

use serde::{Deserialize, Serialize};

/// The source API where the paper was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    SemanticScholar,
    Core,
    Crossref,
    GoogleScholar,
}

impl SourceType {
    /// Returns the display name of the source
    pub fn name(&self) -> &str {
        match self {
            SourceType::SemanticScholar => "Semantic Scholar",
            SourceType::Core => "CORE",
            SourceType::Crossref => "Crossref",
            SourceType::GoogleScholar => "Google Scholar",
        }
    }

    /// Returns the source identifier (for registry lookup and logging)
    pub fn id(&self) -> &str {
        match self {
            SourceType::SemanticScholar => "semantic",
            SourceType::Core => "core",
            SourceType::Crossref => "crossref",
            SourceType::GoogleScholar => "google_scholar",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Placeholder for fields the source did not report.
pub const DATA_UNAVAILABLE: &str = "Data unavailable";

/// A paper normalized into the common record shape
///
/// Each source maps its own response schema into this struct, so the rest of
/// the pipeline never sees per-API field names. Records live only for the
/// duration of one query-response cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title (capped for display, see [`PaperRecord::display_title`])
    pub title: String,

    /// Lead author surname only; `DATA_UNAVAILABLE` when the source has none
    pub author: String,

    /// Publication year, clamped to [1900, current year]; `None` when unknown
    pub year: Option<u16>,

    /// Digital Object Identifier, validated; never a placeholder string
    pub doi: Option<String>,

    /// Abstract text
    pub r#abstract: Option<String>,

    /// Journal or venue name
    pub venue: Option<String>,

    /// Source API this record came from
    pub source: SourceType,
}

impl PaperRecord {
    /// Create a record with only a title; all other fields empty
    pub fn new(title: impl Into<String>, source: SourceType) -> Self {
        Self {
            title: title.into(),
            author: DATA_UNAVAILABLE.to_string(),
            year: None,
            doi: None,
            r#abstract: None,
            venue: None,
            source,
        }
    }

    /// Title capped at 50 characters for display lines
    pub fn display_title(&self) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            return DATA_UNAVAILABLE.to_string();
        }
        title.chars().take(50).collect()
    }

    /// Lowercased title + abstract, used by the relevance filter and the gap
    /// template scorer
    pub fn search_text(&self) -> String {
        let mut text = self.title.to_lowercase();
        if let Some(ref abs) = self.r#abstract {
            text.push(' ');
            text.push_str(&abs.to_lowercase());
        }
        text
    }

    /// One-line citation: "Author Year Title", with a DOI URL suffix when a
    /// DOI is present
    pub fn citation_line(&self) -> String {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| DATA_UNAVAILABLE.to_string());
        let mut line = format!("{} {} {}", self.author, year, self.display_title());
        if let Some(ref doi) = self.doi {
            line.push_str(&format!(" https://doi.org/{}", doi));
        }
        line
    }
}

/// Builder for constructing PaperRecord objects
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    record: PaperRecord,
}

impl PaperBuilder {
    /// Create a new builder with the required fields
    pub fn new(title: impl Into<String>, source: SourceType) -> Self {
        Self {
            record: PaperRecord::new(title, source),
        }
    }

    /// Set the lead author surname
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.record.author = author.into();
        self
    }

    /// Set the publication year (already clamped by the normalizer)
    pub fn year(mut self, year: u16) -> Self {
        self.record.year = Some(year);
        self
    }

    /// Set the DOI (already validated by the normalizer)
    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.record.doi = Some(doi.into());
        self
    }

    /// Set the abstract
    pub fn abstract_text(mut self, text: impl Into<String>) -> Self {
        self.record.r#abstract = Some(text.into());
        self
    }

    /// Set the journal/venue name
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.record.venue = Some(venue.into());
        self
    }

    /// Build the PaperRecord
    pub fn build(self) -> PaperRecord {
        self.record
    }
}
