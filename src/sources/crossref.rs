//! Crossref search source.
//!
//! Uses the Crossref REST API. No API key; Crossref asks polite clients to
//! identify themselves with a `mailto` parameter, taken from `CONTACT_EMAIL`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{PaperBuilder, PaperRecord, SearchQuery, SearchResponse, SourceType};
use crate::normalize;
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::HttpClient;

const CROSSREF_API_BASE: &str = "https://api.crossref.org";

/// Address used when `CONTACT_EMAIL` is not configured.
const DEFAULT_CONTACT: &str = "contact@example.com";

/// Crossref search source
#[derive(Debug, Clone)]
pub struct CrossrefSource {
    client: HttpClient,
    contact_email: String,
    base_url: String,
}

impl CrossrefSource {
    /// Create a new source, reading `CONTACT_EMAIL` from the environment
    pub fn new() -> Result<Self, SourceError> {
        let contact_email =
            std::env::var("CONTACT_EMAIL").unwrap_or_else(|_| DEFAULT_CONTACT.to_string());
        Self::with_contact(contact_email)
    }

    /// Create with an explicit contact email
    pub fn with_contact(contact_email: impl Into<String>) -> Result<Self, SourceError> {
        let contact_email = contact_email.into();
        let user_agent = format!(
            "{}/{} (mailto:{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            contact_email
        );
        Ok(Self {
            client: HttpClient::with_user_agent(&user_agent)?,
            contact_email,
            base_url: CROSSREF_API_BASE.to_string(),
        })
    }

    /// Point the source at a different API base (used by HTTP tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let mut source = Self::with_contact(DEFAULT_CONTACT)?;
        source.base_url = base_url.into();
        Ok(source)
    }

    fn parse_item(item: &CrItem) -> PaperRecord {
        let title = item.title.first().cloned().unwrap_or_default();
        let mut builder = PaperBuilder::new(title, SourceType::Crossref);

        // Crossref splits names; the family field is the surname already
        let surname = item.author.first().and_then(|a| {
            a.family
                .clone()
                .or_else(|| a.given.as_deref().and_then(normalize::lead_author_surname))
        });
        if let Some(surname) = surname {
            builder = builder.author(surname);
        }

        let year = [&item.issued, &item.published_print, &item.published_online]
            .into_iter()
            .flatten()
            .find_map(CrDate::year);
        if let Some(year) = year {
            builder = builder.year(normalize::clamp_year(year));
        }

        let doi = normalize::doi_from_candidates([item.doi.as_deref()])
            .or_else(|| item.url.as_deref().and_then(normalize::doi_from_url));
        if let Some(doi) = doi {
            builder = builder.doi(doi);
        }

        if let Some(ref abs) = item.r#abstract {
            builder = builder.abstract_text(abs.clone());
        }

        if let Some(container) = item
            .container_title
            .first()
            .cloned()
            .filter(|c| !c.trim().is_empty())
        {
            builder = builder.venue(container);
        }

        builder.build()
    }
}

#[async_trait]
impl Source for CrossrefSource {
    fn id(&self) -> &str {
        "crossref"
    }

    fn name(&self) -> &str {
        "Crossref"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        let url = format!(
            "{}/works?query={}&rows={}&sort=published&order=desc&mailto={}",
            self.base_url,
            urlencoding::encode(&query.topic),
            query.max_results.clamp(1, 100),
            urlencoding::encode(&self.contact_email)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Crossref: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "Crossref API returned status {}",
                status
            )));
        }

        let data: CrResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let papers: Vec<PaperRecord> = data.message.items.iter().map(Self::parse_item).collect();

        let mut response = SearchResponse::new(papers, self.name(), &query.topic);
        if let Some(total) = data.message.total_results {
            response = response.total_results(total);
        }
        Ok(response)
    }
}

// ===== Crossref API types =====

#[derive(Debug, Deserialize)]
struct CrResponse {
    message: CrMessage,
}

#[derive(Debug, Deserialize)]
struct CrMessage {
    #[serde(rename = "total-results")]
    total_results: Option<usize>,
    #[serde(default)]
    items: Vec<CrItem>,
}

#[derive(Debug, Deserialize)]
struct CrItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    author: Vec<CrAuthor>,
    #[serde(rename = "DOI")]
    doi: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    issued: Option<CrDate>,
    #[serde(rename = "published-print")]
    published_print: Option<CrDate>,
    #[serde(rename = "published-online")]
    published_online: Option<CrDate>,
    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,
    r#abstract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrAuthor {
    given: Option<String>,
    family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<i64>>,
}

impl CrDate {
    fn year(&self) -> Option<i64> {
        self.date_parts.first().and_then(|parts| parts.first()).copied()
    }
}
