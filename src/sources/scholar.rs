//! Google Scholar fallback source.
//!
//! Google Scholar has no public API; this source scrapes the result page
//! HTML. It is registered as a fallback and only consulted when every
//! primary API comes up empty. Scraping may break whenever Google changes
//! the page markup, so every extraction here is best-effort.

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::models::{PaperBuilder, PaperRecord, SearchQuery, SearchResponse, SourceType};
use crate::normalize;
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::HttpClient;

const SCHOLAR_BASE: &str = "https://scholar.google.com/scholar";

/// Scholar blocks obvious bots; present a browser user agent
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Scholar fallback source
#[derive(Debug, Clone)]
pub struct ScholarSource {
    client: HttpClient,
    base_url: String,
}

impl ScholarSource {
    /// Create a new fallback source
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::with_user_agent(BROWSER_USER_AGENT)?,
            base_url: SCHOLAR_BASE.to_string(),
        })
    }

    /// Point the source at a different page base (used by HTTP tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::with_user_agent(BROWSER_USER_AGENT)?,
            base_url: base_url.into(),
        })
    }

    /// Parse the result list out of a Scholar page
    pub fn parse_results(html: &str) -> Result<Vec<PaperRecord>, SourceError> {
        let document = Html::parse_document(html);

        let item_selector = Selector::parse("div.gs_r.gs_or.gs_scl")
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        let title_selector =
            Selector::parse("h3.gs_rt").map_err(|e| SourceError::Parse(e.to_string()))?;
        let link_selector =
            Selector::parse("h3.gs_rt a").map_err(|e| SourceError::Parse(e.to_string()))?;
        let meta_selector =
            Selector::parse("div.gs_a").map_err(|e| SourceError::Parse(e.to_string()))?;
        let snippet_selector =
            Selector::parse("div.gs_rs").map_err(|e| SourceError::Parse(e.to_string()))?;

        let mut papers = Vec::new();

        for item in document.select(&item_selector) {
            let mut title = String::new();
            let mut article_url = None;

            if let Some(title_elem) = item.select(&title_selector).next() {
                if let Some(link) = item.select(&link_selector).next() {
                    title = link.text().collect::<String>().trim().to_string();
                    article_url = link.value().attr("href").map(str::to_string);
                } else {
                    // Title without a link ([CITATION] entries)
                    title = title_elem.text().collect::<String>().trim().to_string();
                }
            }

            if title.is_empty() {
                continue;
            }

            let mut builder = PaperBuilder::new(title, SourceType::GoogleScholar);

            // Metadata line: "A Author, B Author - Venue, 2021 - publisher"
            if let Some(meta_elem) = item.select(&meta_selector).next() {
                let meta_text = meta_elem.text().collect::<String>();
                let parts: Vec<&str> = meta_text.split(" - ").collect();

                if let Some(first_author) = parts
                    .first()
                    .and_then(|authors| authors.split(',').next())
                    .and_then(|a| normalize::lead_author_surname(a.trim_end_matches('…')))
                {
                    builder = builder.author(first_author);
                }

                if parts.len() >= 2 {
                    let venue_year = parts[1];
                    if let Some(year) = normalize::year_from_text(venue_year) {
                        builder = builder.year(normalize::clamp_year(year));
                        let venue = venue_year
                            .split(&year.to_string())
                            .next()
                            .unwrap_or("")
                            .trim()
                            .trim_end_matches(',');
                        if !venue.is_empty() {
                            builder = builder.venue(venue.to_string());
                        }
                    } else if !venue_year.trim().is_empty() {
                        builder = builder.venue(venue_year.trim().to_string());
                    }
                }
            }

            if let Some(snippet_elem) = item.select(&snippet_selector).next() {
                let snippet = snippet_elem.text().collect::<String>().trim().to_string();
                if !snippet.is_empty() {
                    builder = builder.abstract_text(snippet);
                }
            }

            if let Some(doi) = article_url.as_deref().and_then(normalize::doi_from_url) {
                builder = builder.doi(doi);
            }

            papers.push(builder.build());
        }

        Ok(papers)
    }
}

#[async_trait]
impl Source for ScholarSource {
    fn id(&self) -> &str {
        "google_scholar"
    }

    fn name(&self) -> &str {
        "Google Scholar"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH | SourceCapabilities::FALLBACK
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| SourceError::Parse(format!("Invalid Scholar URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("hl", "en")
            .append_pair("q", &query.topic)
            .append_pair("num", &query.max_results.clamp(1, 10).to_string());

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch Google Scholar: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "Google Scholar returned status {}",
                status
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to read response: {}", e)))?;

        let papers = Self::parse_results(&html)?;
        let count = papers.len();
        Ok(SearchResponse::new(papers, self.name(), &query.topic).total_results(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <html><body>
        <div class="gs_r gs_or gs_scl">
            <h3 class="gs_rt"><a href="https://link.springer.com/article/10.1007/s10916-023-01925-4">Machine learning in clinical decision support</a></h3>
            <div class="gs_a">J Smith, R Jones - Journal of Medical Systems, 2023 - springer.com</div>
            <div class="gs_rs">We review machine learning methods for healthcare decision support…</div>
        </div>
        <div class="gs_r gs_or gs_scl">
            <h3 class="gs_rt">Citation-only entry without link</h3>
            <div class="gs_a">A Author - Some Venue</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_results() {
        let papers = ScholarSource::parse_results(SAMPLE_HTML).unwrap();
        assert_eq!(papers.len(), 2);

        let first = &papers[0];
        assert_eq!(first.title, "Machine learning in clinical decision support");
        assert_eq!(first.author, "Smith");
        assert_eq!(first.year, Some(2023));
        assert_eq!(first.venue, Some("Journal of Medical Systems".to_string()));
        assert_eq!(first.doi, Some("10.1007/s10916-023-01925-4".to_string()));
        assert!(first.r#abstract.as_deref().unwrap_or("").contains("healthcare"));

        let second = &papers[1];
        assert_eq!(second.title, "Citation-only entry without link");
        assert_eq!(second.year, None);
        assert_eq!(second.venue, Some("Some Venue".to_string()));
    }

    #[test]
    fn test_parse_empty_page() {
        let papers = ScholarSource::parse_results("<html><body></body></html>").unwrap();
        assert!(papers.is_empty());
    }

    #[tokio::test]
    async fn test_search_fetches_and_parses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/.*".to_string()))
            .with_status(200)
            .with_body(SAMPLE_HTML)
            .create_async()
            .await;

        let source = ScholarSource::with_base_url(server.url()).unwrap();
        let response = source
            .search(&SearchQuery::new("machine learning"))
            .await
            .unwrap();

        assert_eq!(response.papers.len(), 2);
        assert_eq!(response.source, "Google Scholar");
    }

    #[test]
    fn test_is_fallback() {
        let source = ScholarSource::new().unwrap();
        assert!(source.is_fallback());
    }
}
