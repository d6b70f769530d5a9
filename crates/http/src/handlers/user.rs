use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use natura_core::OAUTH_STATE_COOKIE_NAME;

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::parse_state;
use crate::query_types::{CallbackQuery, LoginQuery};

/// Where a successful login lands when no return URL was given.
pub const DEFAULT_RETURN_URL: &str = "/collection";

/// `GET /api/user/login?returnUrl=...`
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Result<Response, ApiError> {
    let return_url = local_return_url(query.return_url.as_deref());
    let jar = state.auth.jar(&headers);

    if state.auth.session_user(&jar).is_some() {
        return Ok(Redirect::to(&return_url).into_response());
    }

    let (authorize_url, state_cookie) = state.auth.authorize(&return_url)?;
    tracing::debug!(%return_url, "starting login");
    Ok((jar.add(state_cookie), Redirect::to(authorize_url.as_str())).into_response())
}

/// `GET /api/user/callback?code=&state=`
pub async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
    if let Some(error) = query.error {
        tracing::warn!(%error, "identity provider refused login");
        return Err(ApiError::Forbidden(format!("login failed: {error}")));
    }

    let jar = state.auth.jar(&headers);
    let stored = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .ok_or_else(|| ApiError::BadRequest("missing login state".to_owned()))?;
    let (expected_state, return_url) = parse_state(stored.value())
        .ok_or_else(|| ApiError::BadRequest("malformed login state".to_owned()))?;

    if query.state.as_deref() != Some(expected_state) {
        return Err(ApiError::Forbidden("login state mismatch".to_owned()));
    }
    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing authorization code".to_owned()))?;

    state.auth.exchange_code(code).await?;

    let user_id = state.auth.default_user_id().to_owned();
    let return_url = local_return_url(Some(return_url));
    tracing::info!(%user_id, "user signed in");

    let jar = jar.remove(state.auth.state_removal()).add(state.auth.session_cookie(&user_id));
    Ok((jar, Redirect::to(&return_url)).into_response())
}

/// `POST /api/user/logout`
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let jar = state.auth.jar(&headers);
    (jar.remove(state.auth.session_removal()), StatusCode::NO_CONTENT)
}

/// Only same-site paths are accepted as redirect targets.
fn local_return_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(url)
            if url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\") =>
        {
            url.to_owned()
        },
        _ => DEFAULT_RETURN_URL.to_owned(),
    }
}
