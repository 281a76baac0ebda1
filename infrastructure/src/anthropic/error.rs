//! Error types for the remote model adapter

use thiserror::Error;

/// Errors produced by one transport-level request, before the retry and
/// classification policy is applied.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The provider asked us to slow down. Retryable.
    #[error("rate limited: {message}")]
    RateLimited { message: String },

    /// The provider rejected the request outright. The message is inspected
    /// for overflow keywords before it surfaces to callers.
    #[error("request rejected ({kind}): {message}")]
    Rejected { kind: String, message: String },

    /// The request never produced a usable provider response (network
    /// failure, non-JSON body, unexpected status).
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Keywords that mark a rejection as a context overflow.
const OVERFLOW_KEYWORDS: [&str; 4] = ["context", "token", "too long", "maximum"];

/// Case-insensitive substring match against the overflow keyword list.
pub fn is_overflow_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    OVERFLOW_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_keywords_match_case_insensitively() {
        assert!(is_overflow_message("maximum context length exceeded"));
        assert!(is_overflow_message("Prompt is TOO LONG for this model"));
        assert!(is_overflow_message("input exceeds the token limit"));
        assert!(is_overflow_message("Maximum input size reached"));
    }

    #[test]
    fn test_unrelated_rejections_do_not_match() {
        assert!(!is_overflow_message("invalid api key"));
        assert!(!is_overflow_message("model not found"));
        assert!(!is_overflow_message(""));
    }
}
