//! Error types for the Ollama client.

use thiserror::Error;

/// Errors from issuing a request to the Ollama server.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request could not be completed (connect, send, or read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    /// Whether retrying this request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Errors surfaced through a [`ChatStream`](crate::ChatStream).
///
/// The stream yields the error as its final item and then ends; lines after
/// the failure point are never delivered.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading the response body failed mid-stream.
    #[error("stream read error: {0}")]
    Read(#[from] reqwest::Error),

    /// A body chunk was not valid UTF-8.
    #[error("UTF-8 decode error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A non-empty line was not valid JSON.
    #[error("JSON parse error in NDJSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_error_display() {
        assert_eq!(
            ClientError::InvalidResponse("missing models field".into()).to_string(),
            "invalid response: missing models field"
        );
    }

    #[test]
    fn invalid_response_is_not_retryable() {
        assert!(!ClientError::InvalidResponse("x".into()).is_retryable());
    }

    #[test]
    fn other_passes_message_through() {
        let inner: Box<dyn std::error::Error + Send + Sync> = "wrapped".into();
        assert_eq!(ClientError::Other(inner).to_string(), "wrapped");
    }

    #[test]
    fn parse_error_display() {
        let parse_err = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let display = StreamError::Parse(parse_err).to_string();
        assert!(display.starts_with("JSON parse error in NDJSON:"));
    }

    #[test]
    fn utf8_error_display() {
        let utf8_err = std::str::from_utf8(&[0xff]).unwrap_err();
        let display = StreamError::Utf8(utf8_err).to_string();
        assert!(display.starts_with("UTF-8 decode error:"));
    }
}
