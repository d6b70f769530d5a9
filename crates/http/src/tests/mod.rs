//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Request, Response};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::Key;
use natura_core::{DEFAULT_USER_ID, IdentifiedPlant, SESSION_COOKIE_NAME};
use natura_gbif::{GbifClient, RetryPolicy};
use natura_identify::{IdentifyError, PlantIdentifier};
use natura_service::{CollectionService, PlantService};
use natura_storage::StorageBackend;
use tower::ServiceExt;

use crate::{AppState, Auth, create_router};


/// Identifier answering every photo the same way.
pub enum FakeIdentifier {
    Found(IdentifiedPlant),
    Nothing,
    Broken,
}

#[async_trait]
impl PlantIdentifier for FakeIdentifier {
    async fn identify_bytes(&self, _image: Vec<u8>) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        self.answer()
    }

    async fn identify_url(&self, _image_url: &str) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        self.answer()
    }
}

impl FakeIdentifier {
    fn answer(&self) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        match self {
            Self::Found(plant) => Ok(Some(plant.clone())),
            Self::Nothing => Ok(None),
            Self::Broken => Err(IdentifyError::HttpStatus { code: 500, body: "down".to_owned() }),
        }
    }
}

pub fn banksia() -> FakeIdentifier {
    FakeIdentifier::Found(IdentifiedPlant {
        scientific_name: "Banksia serrata".to_owned(),
        common_names: vec!["Old Man Banksia".to_owned(), "Saw Banksia".to_owned()],
        gbif_id: None,
    })
}

pub struct TestApp {
    pub state: Arc<AppState>,
    pub storage: Arc<StorageBackend>,
}

impl TestApp {
    pub async fn new(identifier: FakeIdentifier) -> Self {
        Self::with_auth(identifier, Auth::new(Key::generate(), DEFAULT_USER_ID.to_owned())).await
    }

    pub async fn with_auth(identifier: FakeIdentifier, auth: Auth) -> Self {
        Self::build(identifier, auth, "http://127.0.0.1:9").await
    }

    pub async fn build(identifier: FakeIdentifier, auth: Auth, gbif_url: &str) -> Self {
        let storage = Arc::new(StorageBackend::new_sqlite("sqlite::memory:").await.unwrap());
        let gbif = Arc::new(
            GbifClient::new(gbif_url).unwrap().with_retry_policy(RetryPolicy::none()),
        );
        let state = Arc::new(AppState {
            plant_service: Arc::new(PlantService::new(
                Arc::clone(&storage),
                Arc::new(identifier),
                Arc::clone(&gbif),
            )),
            collection_service: Arc::new(CollectionService::new(Arc::clone(&storage), gbif)),
            auth,
        });
        Self { state, storage }
    }

    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    /// `Cookie` header value carrying a signed session for `user_id`.
    pub fn session_for(&self, user_id: &str) -> String {
        let auth = &self.state.auth;
        let jar = auth.jar(&HeaderMap::new()).add(auth.session_cookie(user_id));
        let response = (jar, ()).into_response();
        set_cookie(&response, SESSION_COOKIE_NAME).unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder().uri(uri).header(COOKIE, cookie).body(Body::empty()).unwrap()
}

/// `name=value` of the `Set-Cookie` header for `name`.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_and_version() {
    let app = TestApp::new(FakeIdentifier::Nothing).await;

    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), 200);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");

    let response = app.send(get("/api/version")).await;
    assert_eq!(json_body(response).await["version"], env!("CARGO_PKG_VERSION"));
}
