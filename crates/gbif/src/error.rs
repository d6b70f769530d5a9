//! Typed error enum for the GBIF crate.

use thiserror::Error;

/// Errors from GBIF API operations.
#[derive(Debug, Error)]
pub enum GbifError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<GbifError>),
}

impl GbifError {
    /// Whether this error is transient and should be retried.
    ///
    /// Connection failures and timeouts, server errors, request timeouts and
    /// rate limiting are transient; everything else is the caller's problem.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(e) => !e.is_builder() && !e.is_decode(),
            Self::HttpStatus { code, .. } => *code >= 500 || matches!(code, 408 | 429),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> GbifError {
        GbifError::HttpStatus { code, body: String::new() }
    }

    #[test]
    fn server_errors_are_transient() {
        for code in [500, 502, 503, 504] {
            assert!(status(code).is_transient(), "{code} should be retried");
        }
        assert!(status(408).is_transient());
        assert!(status(429).is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        for code in [400, 401, 403, 404, 422] {
            assert!(!status(code).is_transient(), "{code} should not be retried");
        }
    }

    #[test]
    fn exhausted_and_parse_errors_are_final() {
        let exhausted = GbifError::RetriesExhausted(Box::new(status(503)));
        assert!(!exhausted.is_transient());
        assert!(exhausted.to_string().contains("503"));

        let parse = GbifError::JsonParse {
            context: "occurrence search".to_owned(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert!(!parse.is_transient());
    }
}
