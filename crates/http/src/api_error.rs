//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into HTTP responses with a JSON body and status
//! code. Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use natura_service::ServiceError;

/// Message for every identification that yields nothing usable.
pub const NO_SPECIES: &str = "no species identified";

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 401 Unauthorized: no valid session cookie.
    Unauthorized(String),
    /// 403 Forbidden: login rejected (state mismatch, provider refusal).
    Forbidden(String),
    /// 404 Not Found: nothing identified, or unknown resource.
    NotFound(String),
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: login provider not configured.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Identify(e) => {
                tracing::warn!(error = %e, "identification provider failed");
                Self::NotFound(NO_SPECIES.to_owned())
            },
            ServiceError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            _ => Self::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use natura_identify::IdentifyError;
    use natura_storage::StorageError;

    use super::*;

    fn identify_error() -> IdentifyError {
        IdentifyError::HttpStatus { code: 500, body: "boom".to_owned() }
    }

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn identification_failures_are_not_found() {
        let err = ApiError::from(ServiceError::Identify(identify_error()));
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == NO_SPECIES));
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(
            status_of(ServiceError::InvalidInput("empty".to_owned()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::NotFound("user nobody".to_owned()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::Storage(StorageError::Migration("x".to_owned())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = ApiError::Internal(anyhow::anyhow!("secret connection string")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal server error");
    }

    #[tokio::test]
    async fn lost_insert_races_do_not_expose_constraint_text() {
        let duplicate = StorageError::Duplicate(
            "UNIQUE constraint failed: plants.scientific_name".to_owned(),
        );
        let response = ApiError::from(ServiceError::Storage(duplicate)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("UNIQUE"), "{text}");
        assert!(!text.contains("plants"), "{text}");
        assert_eq!(text, r#"{"error":"internal server error"}"#);
    }
}
