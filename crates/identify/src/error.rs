//! Typed error enum for the identification crate.

use thiserror::Error;

/// Errors from identification providers.
#[derive(Debug, Error)]
pub enum IdentifyError {
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
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
