//! HTTP API server for natura.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
pub mod auth;
mod handlers;
mod query_types;
mod response_types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use natura_core::MAX_IMAGE_BYTES;
use natura_service::{CollectionService, PlantService};
use tower_http::trace::TraceLayer;

pub use api_error::ApiError;
pub use auth::{Auth, OAuthConfig};
pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Identification and merge-on-insert
    pub plant_service: Arc<PlantService>,
    /// Collection pages with images
    pub collection_service: Arc<CollectionService>,
    /// Cookie signing, sessions and the optional OAuth client
    pub auth: Auth,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(
            "/api/identify",
            get(handlers::identify::identify_url).post(handlers::identify::identify_upload),
        )
        .route("/api/user/login", get(handlers::user::login))
        .route("/api/user/callback", get(handlers::user::callback))
        .route("/api/user/logout", post(handlers::user::logout))
        .route("/api/collection", get(handlers::collection::get_collection))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
