//! Request/query types (Deserialize)

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IdentifyQuery {
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "returnUrl", alias = "return_url")]
    pub return_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user declined or login failed.
    pub error: Option<String>,
}
