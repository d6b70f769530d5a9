//! Shared fixtures for service tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use natura_core::IdentifiedPlant;
use natura_gbif::{GbifClient, RetryPolicy};
use natura_identify::{IdentifyError, PlantIdentifier};
use natura_storage::StorageBackend;
use wiremock::MockServer;


/// Identifier that answers every request with a fixed result.
pub struct FakeIdentifier {
    answer: Mutex<Option<Result<Option<IdentifiedPlant>, IdentifyError>>>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeIdentifier {
    pub fn returning(plant: Option<IdentifiedPlant>) -> Arc<Self> {
        Arc::new(Self { answer: Mutex::new(Some(Ok(plant))), requests: Mutex::new(Vec::new()) })
    }

    pub fn failing(error: IdentifyError) -> Arc<Self> {
        Arc::new(Self { answer: Mutex::new(Some(Err(error))), requests: Mutex::new(Vec::new()) })
    }

    fn answer(&self, request: String) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        self.requests.lock().unwrap().push(request);
        let mut answer = self.answer.lock().unwrap();
        if let Some(Ok(plant)) = answer.as_ref() {
            return Ok(plant.clone());
        }
        answer.take().unwrap_or(Ok(None))
    }
}

#[async_trait]
impl PlantIdentifier for FakeIdentifier {
    async fn identify_bytes(&self, image: Vec<u8>) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        self.answer(format!("bytes:{}", image.len()))
    }

    async fn identify_url(&self, image_url: &str) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        self.answer(format!("url:{image_url}"))
    }
}

pub fn identified(scientific_name: &str, common_names: &[&str], gbif_id: Option<&str>) -> IdentifiedPlant {
    IdentifiedPlant {
        scientific_name: scientific_name.to_owned(),
        common_names: common_names.iter().map(|s| (*s).to_owned()).collect(),
        gbif_id: gbif_id.map(str::to_owned),
    }
}

pub async fn test_storage() -> Arc<StorageBackend> {
    Arc::new(StorageBackend::new_sqlite("sqlite::memory:").await.unwrap())
}

/// GBIF client pointed at a mock server, retrying quickly.
pub fn gbif_for(server: &MockServer) -> Arc<GbifClient> {
    Arc::new(
        GbifClient::new(&server.uri())
            .unwrap()
            .with_retry_policy(RetryPolicy::new(1, Duration::from_millis(5))),
    )
}

/// GBIF client for tests that never reach GBIF.
pub fn offline_gbif() -> Arc<GbifClient> {
    Arc::new(
        GbifClient::new("http://127.0.0.1:9").unwrap().with_retry_policy(RetryPolicy::none()),
    )
}
