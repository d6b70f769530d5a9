use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use natura_service::ImageSource;

use crate::AppState;
use crate::api_error::{ApiError, NO_SPECIES};
use crate::query_types::IdentifyQuery;

/// `GET /api/identify?image=<url>`
pub async fn identify_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<IdentifyQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let image = query
        .image
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("image query parameter is required".to_owned()))?;
    identify(&state, &headers, ImageSource::Url(image)).await
}

/// `POST /api/identify` with the raw image as body.
pub async fn identify_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<String>>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("image body is empty".to_owned()));
    }
    identify(&state, &headers, ImageSource::Bytes(body.to_vec())).await
}

async fn identify(
    state: &AppState,
    headers: &HeaderMap,
    source: ImageSource,
) -> Result<Json<Vec<String>>, ApiError> {
    let user_id = state.auth.current_user(headers);
    state
        .plant_service
        .identify_and_collect(source, &user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NO_SPECIES.to_owned()))
}
