//! Semantic Scholar search source.
//!
//! Uses the Semantic Scholar Graph API. An API key (`S2_API_KEY`) raises the
//! rate limit but is not required.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{PaperBuilder, PaperRecord, SearchQuery, SearchResponse, SourceType};
use crate::normalize;
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::HttpClient;

const SEMANTIC_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Fields requested from the Graph API; anything omitted here comes back null
const SEARCH_FIELDS: &str = "title,authors,year,abstract,venue,journal,externalIds,url";

/// Semantic Scholar search source
#[derive(Debug, Clone)]
pub struct SemanticScholarSource {
    client: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl SemanticScholarSource {
    /// Create a new source, reading `S2_API_KEY` from the environment
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: std::env::var("S2_API_KEY").ok(),
            base_url: SEMANTIC_API_BASE.to_string(),
        })
    }

    /// Create with an explicit API key
    pub fn with_api_key(api_key: String) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: Some(api_key),
            base_url: SEMANTIC_API_BASE.to_string(),
        })
    }

    /// Point the source at a different API base (used by HTTP tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: None,
            base_url: base_url.into(),
        })
    }

    fn parse_paper(data: &S2Paper) -> PaperRecord {
        let mut builder = PaperBuilder::new(
            data.title.clone().unwrap_or_default(),
            SourceType::SemanticScholar,
        );

        if let Some(surname) = data
            .authors
            .first()
            .and_then(|a| a.name.as_deref())
            .and_then(normalize::lead_author_surname)
        {
            builder = builder.author(surname);
        }

        if let Some(year) = data.year {
            builder = builder.year(normalize::clamp_year(year));
        }

        let doi = normalize::doi_from_candidates([
            data.doi.as_deref(),
            data.external_ids.as_ref().and_then(|e| e.doi.as_deref()),
        ])
        .or_else(|| data.url.as_deref().and_then(normalize::doi_from_url));
        if let Some(doi) = doi {
            builder = builder.doi(doi);
        }

        if let Some(ref abs) = data.r#abstract {
            builder = builder.abstract_text(abs.clone());
        }

        let venue = data
            .journal
            .as_ref()
            .and_then(|j| j.name.clone())
            .or_else(|| data.venue.clone())
            .filter(|v| !v.trim().is_empty());
        if let Some(venue) = venue {
            builder = builder.venue(venue);
        }

        builder.build()
    }
}

#[async_trait]
impl Source for SemanticScholarSource {
    fn id(&self) -> &str {
        "semantic"
    }

    fn name(&self) -> &str {
        "Semantic Scholar"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        let url = format!(
            "{}/paper/search?query={}&limit={}&sort=publicationDate:desc&fields={}",
            self.base_url,
            urlencoding::encode(&query.topic),
            query.max_results.clamp(1, 100),
            SEARCH_FIELDS
        );

        let mut request = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            SourceError::Network(format!("Failed to search Semantic Scholar: {}", e))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "Semantic Scholar API returned status {}",
                status
            )));
        }

        let data: S2SearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let papers: Vec<PaperRecord> = data.data.iter().map(Self::parse_paper).collect();

        let mut response = SearchResponse::new(papers, self.name(), &query.topic);
        if let Some(total) = data.total {
            response = response.total_results(total);
        }
        Ok(response)
    }
}

// ===== Semantic Scholar API types =====

#[derive(Debug, Deserialize)]
struct S2SearchResponse {
    total: Option<usize>,
    #[serde(default)]
    data: Vec<S2Paper>,
}

#[derive(Debug, Deserialize)]
struct S2Paper {
    title: Option<String>,
    r#abstract: Option<String>,
    year: Option<i64>,
    #[serde(default)]
    authors: Vec<S2Author>,
    venue: Option<String>,
    journal: Option<S2Journal>,
    doi: Option<String>,
    #[serde(rename = "externalIds")]
    external_ids: Option<S2ExternalIds>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Journal {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "total": 1,
        "data": [{
            "paperId": "abc123",
            "title": "Federated Learning at Scale",
            "abstract": "We present a scalable system.",
            "year": 2023,
            "authors": [{"name": "Jane Q. Doe"}, {"name": "John Roe"}],
            "venue": "NeurIPS",
            "journal": {"name": "Journal of Machine Learning Research"},
            "externalIds": {"DOI": "10.5555/fl.2023"},
            "url": "https://www.semanticscholar.org/paper/abc123"
        }]
    }"#;

    #[tokio::test]
    async fn test_search_parses_papers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/paper/search".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let source = SemanticScholarSource::with_base_url(server.url()).unwrap();
        let response = source
            .search(&SearchQuery::new("federated learning"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.papers.len(), 1);
        assert_eq!(response.total_results, Some(1));

        let paper = &response.papers[0];
        assert_eq!(paper.title, "Federated Learning at Scale");
        assert_eq!(paper.author, "Doe");
        assert_eq!(paper.year, Some(2023));
        assert_eq!(paper.doi, Some("10.5555/fl.2023".to_string()));
        assert_eq!(
            paper.venue,
            Some("Journal of Machine Learning Research".to_string())
        );
        assert_eq!(paper.source, SourceType::SemanticScholar);
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/paper/search".to_string()),
            )
            .with_status(429)
            .create_async()
            .await;

        let source = SemanticScholarSource::with_base_url(server.url()).unwrap();
        let err = source
            .search(&SearchQuery::new("anything"))
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::RateLimit));
    }

    #[tokio::test]
    async fn test_empty_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/paper/search".to_string()),
            )
            .with_status(200)
            .with_body(r#"{"total": 0, "data": []}"#)
            .create_async()
            .await;

        let source = SemanticScholarSource::with_base_url(server.url()).unwrap();
        let response = source.search(&SearchQuery::new("nothing")).await.unwrap();
        assert!(response.papers.is_empty());
    }

    #[test]
    fn test_future_year_clamped() {
        let data: S2SearchResponse = serde_json::from_str(
            r#"{"total": 1, "data": [{"title": "Time Travel", "year": 3024}]}"#,
        )
        .unwrap();
        let paper = SemanticScholarSource::parse_paper(&data.data[0]);
        assert_eq!(paper.year, Some(normalize::current_year()));
    }
}
