//! Retry utilities with exponential backoff for resilient API calls.

use std::time::Duration;
use tokio::time::sleep;

use crate::sources::SourceError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of attempts (first try included)
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            backoff_multiplier: 2.0,
        }
    }
}

/// Transient errors that should trigger a retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientError {
    /// Network connectivity issue or request timeout
    Network,
    /// Rate limit exceeded (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
}

impl TransientError {
    /// Classify a SourceError; `None` means permanent, don't retry
    pub fn from_source_error(err: &SourceError) -> Option<Self> {
        match err {
            SourceError::RateLimit => Some(TransientError::RateLimit),
            SourceError::Network(_) => Some(TransientError::Network),
            SourceError::Api(msg) => {
                let msg = msg.to_lowercase();
                if msg.contains("timeout") {
                    Some(TransientError::Network)
                } else if msg.contains("500")
                    || msg.contains("502")
                    || msg.contains("503")
                    || msg.contains("504")
                    || msg.contains("unavailable")
                {
                    Some(TransientError::ServerError)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Minimum delay worth waiting for this error kind
    pub fn recommended_delay(&self) -> Duration {
        match self {
            TransientError::RateLimit => Duration::from_secs(2),
            TransientError::ServerError => Duration::from_secs(1),
            TransientError::Network => Duration::from_millis(500),
        }
    }
}

/// Execute an async operation, retrying transient failures with exponential
/// backoff
///
/// Permanent errors are returned immediately; transient ones are retried
/// until `max_attempts` is exhausted, then the last error is returned.
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SourceError>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    tracing::info!(attempts, "operation succeeded after retries");
                }
                return Ok(result);
            }
            Err(error) => {
                let Some(transient) = TransientError::from_source_error(&error) else {
                    return Err(error);
                };

                if attempts >= config.max_attempts {
                    tracing::warn!(attempts, %error, "retries exhausted");
                    return Err(error);
                }

                let exp_delay = config.initial_delay.as_secs_f64()
                    * config.backoff_multiplier.powf(f64::from(attempts) - 1.0);
                let delay = Duration::from_secs_f64(exp_delay.min(config.max_delay.as_secs_f64()));
                let delay = std::cmp::max(delay, transient.recommended_delay());

                tracing::debug!(attempts, ?transient, ?delay, "transient error, retrying");
                sleep(delay).await;
            }
        }
    }
}

/// Retry configuration tuned for the paper-search APIs: a short interactive
/// query should not hang for minutes on a flaky source
pub fn api_retry_config() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(500),
        max_delay: Duration::from_secs(8),
        backoff_multiplier: 2.0,
    }
}
