//! Configuration management.
//!
//! Everything is environment-driven; there is no config file. Defaults come
//! from the environment at construction time, and the CLI can override the
//! pipeline knobs afterwards.

use serde::{Deserialize, Serialize};

use crate::filter::DEFAULT_RECENCY_YEARS;

/// Papers requested from each source per query.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API keys for the search services
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// Contact email sent to Crossref as the `mailto` parameter
    #[serde(default)]
    pub contact_email: Option<String>,

    /// Recency window: papers older than this many years are dropped
    #[serde(default = "default_recency_years")]
    pub recency_years: u16,

    /// Maximum results requested from each source
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            contact_email: std::env::var("CONTACT_EMAIL").ok(),
            recency_years: std::env::var("GAP_HUNTER_RECENCY_YEARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RECENCY_YEARS),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeys {
    /// Semantic Scholar API key (optional, raises rate limits)
    #[serde(default)]
    pub semantic_scholar: Option<String>,

    /// CORE API key (required for the CORE source to participate)
    #[serde(default)]
    pub core: Option<String>,
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            semantic_scholar: std::env::var("S2_API_KEY").ok(),
            core: std::env::var("CORE_API_KEY").ok(),
        }
    }
}

fn default_recency_years() -> u16 {
    DEFAULT_RECENCY_YEARS
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_knobs() {
        let config = Config {
            api_keys: ApiKeys {
                semantic_scholar: None,
                core: None,
            },
            contact_email: None,
            ..Config::default()
        };
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert!(config.recency_years >= 1);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    }
}
