//! # Error Handling
//!
//! Client-side error taxonomy for the console. API errors carry the upstream
//! HTTP status and raw body text and render as `API {status}: {body}`, which
//! is the form every view surfaces to the user. Transport and decode
//! failures wrap their sources.

use thiserror::Error;

/// Errors produced by the API client and the polling loop.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response from the API, with the body read as text.
    #[error("API {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot be combined with a request path.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Upstream HTTP status, when this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures, 5xx responses, 408 and 429 are transient; other
    /// 4xx responses and undecodable bodies are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Api { status, .. } => {
                matches!(status, 408 | 429) || (500..600).contains(status)
            }
            ClientError::Network(_) => true,
            ClientError::Decode(_) | ClientError::Url(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_status_and_body() {
        let err = ClientError::Api {
            status: 404,
            body: "job not found".to_string(),
        };
        assert_eq!(err.to_string(), "API 404: job not found");
    }

    #[test]
    fn transient_classification() {
        let rate_limited = ClientError::Api {
            status: 429,
            body: String::new(),
        };
        let server_error = ClientError::Api {
            status: 503,
            body: String::new(),
        };
        let not_found = ClientError::Api {
            status: 404,
            body: String::new(),
        };
        assert!(rate_limited.is_transient());
        assert!(server_error.is_transient());
        assert!(!not_found.is_transient());
    }

    #[test]
    fn status_accessor() {
        let err = ClientError::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));

        let decode: ClientError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(decode.status(), None);
    }
}
