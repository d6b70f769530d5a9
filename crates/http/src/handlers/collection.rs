use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::CollectionResponse;

/// `GET /api/collection` for the signed-in user.
pub async fn get_collection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CollectionResponse>, ApiError> {
    let jar = state.auth.jar(&headers);
    let user_id = state
        .auth
        .session_user(&jar)
        .ok_or_else(|| ApiError::Unauthorized("sign in to see your collection".to_owned()))?;

    let view = state.collection_service.collection_view(&user_id).await?;
    Ok(Json(CollectionResponse::from_view(user_id, view)))
}
