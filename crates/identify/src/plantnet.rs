//! Pl@ntNet identification client.

use std::time::Duration;

use async_trait::async_trait;
use natura_core::{HTTP_TIMEOUT_SECS, IdentifiedPlant, dedup_names};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

use crate::PlantIdentifier;
use crate::error::IdentifyError;
use crate::plantnet_types::{Candidate, IdentificationResponse};

/// Flora searched when none is configured.
pub const DEFAULT_PROJECT: &str = "all";

/// Lets Pl@ntNet decide which organ (leaf, flower, ...) the photo shows.
const ORGANS_AUTO: &str = "auto";

/// Client for the Pl@ntNet identification API.
pub struct PlantNetClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    project: String,
}

impl std::fmt::Debug for PlantNetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantNetClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

impl PlantNetClient {
    /// Creates a client for `base_url` (e.g. `https://my-api.plantnet.org`).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str) -> Result<Self, IdentifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| IdentifyError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            project: DEFAULT_PROJECT.to_owned(),
        })
    }

    /// Restricts identification to one Pl@ntNet flora project.
    #[must_use]
    pub fn with_project(mut self, project: String) -> Self {
        self.project = project;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/identify/{}", self.base_url, self.project)
    }

    /// Sends the request and decodes the candidate list.
    ///
    /// A 404 is how Pl@ntNet says "no species found" and yields an empty list.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<Candidate>, IdentifyError> {
        // The request URL carries the API key; keep it out of error text.
        let response = request.send().await.map_err(reqwest::Error::without_url)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Pl@ntNet found no species");
            return Ok(Vec::new());
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        if !status.is_success() {
            tracing::error!(code = status.as_u16(), body = %body, "Pl@ntNet request failed");
            return Err(IdentifyError::HttpStatus { code: status.as_u16(), body });
        }

        let parsed: IdentificationResponse =
            serde_json::from_str(&body).map_err(|e| IdentifyError::JsonParse {
                context: "identification response".to_owned(),
                source: e,
            })?;
        if let Some(remaining) = parsed.remaining_identification_requests {
            tracing::debug!(remaining, "Pl@ntNet quota");
        }
        Ok(parsed.results)
    }
}

#[async_trait]
impl PlantIdentifier for PlantNetClient {
    async fn identify_bytes(&self, image: Vec<u8>) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        if image.is_empty() {
            return Err(IdentifyError::InvalidInput("image body is empty".to_owned()));
        }
        let size = image.len();
        let part = Part::bytes(image).file_name("image.jpg").mime_str("image/jpeg")?;
        let form = Form::new().part("images", part).text("organs", ORGANS_AUTO);
        let request = self
            .client
            .post(self.endpoint())
            .query(&[("api-key", self.api_key.as_str())])
            .multipart(form);

        tracing::debug!(bytes = size, "identifying uploaded image");
        let candidates = self.send(request).await?;
        Ok(select_best_match(candidates))
    }

    async fn identify_url(
        &self,
        image_url: &str,
    ) -> Result<Option<IdentifiedPlant>, IdentifyError> {
        let image_url = image_url.trim();
        if image_url.is_empty() {
            return Err(IdentifyError::InvalidInput("image url is empty".to_owned()));
        }
        let request = self.client.get(self.endpoint()).query(&[
            ("api-key", self.api_key.as_str()),
            ("images", image_url),
            ("organs", ORGANS_AUTO),
        ]);

        tracing::debug!(image_url, "identifying remote image");
        let candidates = self.send(request).await?;
        Ok(select_best_match(candidates))
    }
}

/// Highest-scoring candidate, normalized.
///
/// Equal scores keep the earliest candidate in provider order. A winner
/// without species data (or with a blank name) counts as no match.
#[must_use]
pub fn select_best_match(candidates: Vec<Candidate>) -> Option<IdentifiedPlant> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        if best.as_ref().is_none_or(|current| candidate.score > current.score) {
            best = Some(candidate);
        }
    }

    let best = best?;
    let species = best.species?;
    let scientific_name = species.scientific_name_without_author.trim().to_owned();
    if scientific_name.is_empty() {
        return None;
    }

    let common_names: Vec<String> = species
        .common_names
        .iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect();

    Some(IdentifiedPlant {
        scientific_name,
        common_names: dedup_names(&common_names),
        gbif_id: best.gbif.and_then(|gbif| gbif.id),
    })
}
