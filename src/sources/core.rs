//! CORE search source.
//!
//! Uses the CORE v3 API, which requires a free API key (`CORE_API_KEY`)
//! passed as a Bearer token. API documentation: https://core.ac.uk/services/api

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{PaperBuilder, PaperRecord, SearchQuery, SearchResponse, SourceType};
use crate::normalize;
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::HttpClient;

const CORE_API_BASE: &str = "https://api.core.ac.uk/v3";

/// CORE search source
#[derive(Debug, Clone)]
pub struct CoreSource {
    client: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl CoreSource {
    /// Create a new source, reading `CORE_API_KEY` from the environment
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: std::env::var("CORE_API_KEY").ok(),
            base_url: CORE_API_BASE.to_string(),
        })
    }

    /// Create with an explicit API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: Some(api_key.into()),
            base_url: CORE_API_BASE.to_string(),
        })
    }

    /// Point the source at a different API base with a fixed key (HTTP tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: Some(api_key.into()),
            base_url: base_url.into(),
        })
    }

    fn parse_work(work: &CoreWork) -> PaperRecord {
        let mut builder =
            PaperBuilder::new(work.title.clone().unwrap_or_default(), SourceType::Core);

        if let Some(surname) = work
            .authors
            .first()
            .and_then(|a| a.name.as_deref())
            .and_then(normalize::lead_author_surname)
        {
            builder = builder.author(surname);
        }

        let year = work.year_published.or_else(|| {
            work.published_date
                .as_deref()
                .and_then(normalize::year_from_date)
        });
        if let Some(year) = year {
            builder = builder.year(normalize::clamp_year(year));
        }

        // DOI candidates: the dedicated field, then DOI-typed identifiers,
        // then one embedded in the download URL
        let identifier_doi = work
            .identifiers
            .iter()
            .find(|i| {
                i.r#type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("doi"))
            })
            .and_then(|i| i.identifier.as_deref());
        let doi = normalize::doi_from_candidates([work.doi.as_deref(), identifier_doi]).or_else(
            || {
                work.download_url
                    .as_deref()
                    .and_then(normalize::doi_from_url)
            },
        );
        if let Some(doi) = doi {
            builder = builder.doi(doi);
        }

        let abstract_text = work
            .r#abstract
            .clone()
            .or_else(|| work.description.clone());
        if let Some(abs) = abstract_text {
            builder = builder.abstract_text(abs);
        }

        if let Some(publisher) = work.publisher.clone().filter(|p| !p.trim().is_empty()) {
            builder = builder.venue(publisher);
        }

        builder.build()
    }
}

#[async_trait]
impl Source for CoreSource {
    fn id(&self) -> &str {
        "core"
    }

    fn name(&self) -> &str {
        "CORE"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        let Some(ref api_key) = self.api_key else {
            return Err(SourceError::MissingCredentials(
                "CORE_API_KEY not configured".to_string(),
            ));
        };

        let url = format!(
            "{}/search/works?q={}&limit={}",
            self.base_url,
            urlencoding::encode(&query.topic),
            query.max_results.clamp(1, 100)
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search CORE: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "CORE API returned status {}",
                status
            )));
        }

        let data: CoreResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let papers: Vec<PaperRecord> = data.results.iter().map(Self::parse_work).collect();

        let mut response = SearchResponse::new(papers, self.name(), &query.topic);
        if let Some(total) = data.total_hits {
            response = response.total_results(total);
        }
        Ok(response)
    }
}

// ===== CORE API types =====

#[derive(Debug, Deserialize)]
struct CoreResponse {
    #[serde(rename = "totalHits")]
    total_hits: Option<usize>,
    #[serde(default)]
    results: Vec<CoreWork>,
}

#[derive(Debug, Deserialize)]
struct CoreWork {
    title: Option<String>,
    r#abstract: Option<String>,
    description: Option<String>,
    #[serde(rename = "yearPublished")]
    year_published: Option<i64>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    doi: Option<String>,
    #[serde(default)]
    authors: Vec<CoreAuthor>,
    publisher: Option<String>,
    #[serde(rename = "downloadUrl")]
    download_url: Option<String>,
    #[serde(default)]
    identifiers: Vec<CoreIdentifier>,
}

#[derive(Debug, Deserialize)]
struct CoreAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoreIdentifier {
    identifier: Option<String>,
    r#type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "totalHits": 2,
        "results": [{
            "title": "Open Access Mining",
            "abstract": "Text mining over repositories.",
            "yearPublished": 2022,
            "authors": [{"name": "Maria C. Silva"}],
            "publisher": "Springer",
            "identifiers": [
                {"identifier": "oai:core:1", "type": "OAI"},
                {"identifier": "10.1007/core.2022", "type": "DOI"}
            ]
        }, {
            "title": "Undated Work",
            "publishedDate": "2021-03-02",
            "authors": [],
            "doi": "bad"
        }]
    }"#;

    #[tokio::test]
    async fn test_search_parses_works() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/search/works".to_string()),
            )
            .match_header("Authorization", "Bearer test-key")
            .with_status(200)
            .with_body(SAMPLE)
            .create_async()
            .await;

        let source = CoreSource::with_base_url(server.url(), "test-key").unwrap();
        let response = source.search(&SearchQuery::new("text mining")).await.unwrap();

        assert_eq!(response.papers.len(), 2);
        assert_eq!(response.total_results, Some(2));

        let first = &response.papers[0];
        assert_eq!(first.author, "Silva");
        assert_eq!(first.year, Some(2022));
        // Identifier-list DOI wins because the top-level field is absent
        assert_eq!(first.doi, Some("10.1007/core.2022".to_string()));
        assert_eq!(first.venue, Some("Springer".to_string()));

        let second = &response.papers[1];
        assert_eq!(second.year, Some(2021));
        // Invalid top-level DOI must be dropped, not stored
        assert_eq!(second.doi, None);
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        let source = CoreSource {
            client: HttpClient::new().unwrap(),
            api_key: None,
            base_url: "http://unused".to_string(),
        };
        let err = source.search(&SearchQuery::new("topic")).await.unwrap_err();
        assert!(matches!(err, SourceError::MissingCredentials(_)));
    }
}
