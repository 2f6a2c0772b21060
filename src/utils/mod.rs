//! Utility modules supporting the pipeline.
//!
//! - [`deduplicate_papers`]: remove cross-source duplicates via DOI matching
//!   and title similarity
//! - [`HttpClient`]: shared HTTP client with timeouts and user agent
//! - [`RetryConfig`] / [`with_retry`]: exponential-backoff retry for
//!   transient API failures
//! - [`validate_topic`]: topic input validation

mod dedup;
mod http;
mod retry;
mod validate;

pub use dedup::deduplicate_papers;
pub use http::HttpClient;
pub use retry::{api_retry_config, with_retry, RetryConfig, TransientError};
pub use validate::{validate_topic, ValidationError, MAX_TOPIC_LEN, MIN_TOPIC_LEN};
