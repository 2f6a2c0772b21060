//! Input validation for topics and DOIs.

use thiserror::Error;

/// Longest topic accepted; longer input is truncated, not rejected.
pub const MAX_TOPIC_LEN: usize = 200;

/// Shortest topic accepted after trimming.
pub const MIN_TOPIC_LEN: usize = 3;

/// Validation error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide a research topic")]
    EmptyTopic,

    #[error("Please provide a more detailed research topic (at least {MIN_TOPIC_LEN} characters)")]
    TopicTooShort,
}

/// Validate and canonicalize a topic string
///
/// Trims whitespace, rejects empty or sub-3-character input, and truncates
/// anything past [`MAX_TOPIC_LEN`] characters.
pub fn validate_topic(topic: &str) -> Result<String, ValidationError> {
    let topic = topic.trim();

    if topic.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }

    if topic.chars().count() < MIN_TOPIC_LEN {
        return Err(ValidationError::TopicTooShort);
    }

    if topic.chars().count() > MAX_TOPIC_LEN {
        tracing::warn!(len = topic.len(), "topic truncated to {MAX_TOPIC_LEN} characters");
        return Ok(topic.chars().take(MAX_TOPIC_LEN).collect());
    }

    Ok(topic.to_string())
}
