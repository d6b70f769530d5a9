use std::collections::HashSet;
use std::time::Duration;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use natura_core::{HTTP_TIMEOUT_SECS, IMAGE_FANOUT_LIMIT, MAX_VERNACULAR_NAMES, PlantImage};
use serde::de::DeserializeOwned;

use crate::cache::ImageCache;
use crate::error::GbifError;
use crate::retry::RetryPolicy;
use crate::types::{Occurrence, QueryResult, SeedFilter, Vernacular};

/// Language tag GBIF uses for English vernacular names.
const ENGLISH: &str = "eng";

/// Client for the GBIF REST API.
#[derive(Debug, Clone)]
pub struct GbifClient {
    client: reqwest::Client,
    base_url: String,
    cache: ImageCache,
    retry: RetryPolicy,
}

impl GbifClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.gbif.org/v1`).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str) -> Result<Self, GbifError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("natura/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GbifError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            cache: ImageCache::default(),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_cache(mut self, cache: ImageCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Images attached to occurrences of a species.
    ///
    /// A cached non-empty list is returned without touching the network.
    /// Otherwise the occurrences are searched and the result (possibly empty)
    /// is cached with sliding expiration.
    ///
    /// # Errors
    /// Returns an error if the search fails after retries.
    pub async fn find_images_for_species(
        &self,
        species_key: &str,
    ) -> Result<Vec<PlantImage>, GbifError> {
        if let Some(cached) = self.cache.get(species_key).await {
            if !cached.is_empty() {
                tracing::debug!(species_key, images = cached.len(), "image cache hit");
                return Ok(cached.as_ref().clone());
            }
        }

        let images = self.search_images(species_key).await?;
        tracing::debug!(species_key, images = images.len(), "image cache filled");
        self.cache.insert(species_key, images.clone()).await;
        Ok(images)
    }

    /// Images for several species at once, fetched concurrently and uncached.
    ///
    /// The result is the union of all images in no particular order.
    ///
    /// # Errors
    /// Returns the first search error encountered.
    pub async fn find_images_for_species_batch(
        &self,
        species_keys: &[String],
    ) -> Result<Vec<PlantImage>, GbifError> {
        let batches: Vec<Vec<PlantImage>> = stream::iter(species_keys)
            .map(|key| self.search_images(key))
            .buffer_unordered(IMAGE_FANOUT_LIMIT)
            .try_collect()
            .await?;
        Ok(batches.into_iter().flatten().collect())
    }

    /// Up to three distinct English common names for a species.
    ///
    /// # Errors
    /// Returns an error if the lookup fails after retries.
    pub async fn find_vernacular_names(&self, species_key: u64) -> Result<Vec<String>, GbifError> {
        let query = [("language", "en".to_owned()), ("limit", MAX_VERNACULAR_NAMES.to_string())];
        let response: QueryResult<Vernacular> = self
            .get_json(
                &format!("species/{species_key}/vernacularNames"),
                &query,
                "vernacular names",
            )
            .await?;
        Ok(english_names(response.results))
    }

    /// One representative occurrence per species matching `filter`.
    ///
    /// # Errors
    /// Returns an error if the search fails after retries.
    pub async fn get_seed_occurrences(
        &self,
        filter: &SeedFilter,
    ) -> Result<Vec<Occurrence>, GbifError> {
        let response: QueryResult<Occurrence> =
            self.get_json("occurrence/search", &filter.query_pairs(), "seed occurrences").await?;
        let total = response.results.len();
        let representatives = first_per_species(response.results);
        tracing::info!(
            occurrences = total,
            species = representatives.len(),
            country = %filter.country,
            "fetched seed occurrences"
        );
        Ok(representatives)
    }

    async fn search_images(&self, species_key: &str) -> Result<Vec<PlantImage>, GbifError> {
        let query = [("speciesKey", species_key.to_owned())];
        let response: QueryResult<Occurrence> =
            self.get_json("occurrence/search", &query, "occurrence search").await?;
        Ok(extract_images(response.results))
    }

    /// GET `path` and decode the JSON body, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        context: &str,
    ) -> Result<T, GbifError> {
        let url = format!("{}/{path}", self.base_url);
        let max_retries = self.retry.max_retries;
        let mut last_error: Option<GbifError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let delay = self.retry.delay_for(attempt);
                tracing::warn!(path, "GBIF retry attempt {attempt}/{max_retries} after {delay:?}");
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(&url).query(query).send().await {
                Ok(r) => r,
                Err(e) => {
                    let err = GbifError::HttpRequest(e);
                    if err.is_transient() {
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(GbifError::HttpRequest(e));
                        continue;
                    },
                };
                return serde_json::from_str(&body).map_err(|e| GbifError::JsonParse {
                    context: format!("{context} (body: {})", truncate(&body, 200)),
                    source: e,
                });
            }

            let code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let err = GbifError::HttpStatus { code, body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            if let GbifError::HttpStatus { ref body, .. } = err {
                tracing::error!(path, code, body = %body, "GBIF request failed");
            }
            return Err(err);
        }

        let last = last_error.unwrap_or_else(|| {
            GbifError::ClientInit("retry loop finished without an attempt".to_owned())
        });
        tracing::error!(path, error = %last, "GBIF retries exhausted");
        Err(GbifError::RetriesExhausted(Box::new(last)))
    }
}

/// All media records with a usable link, in occurrence order.
pub(crate) fn extract_images(occurrences: Vec<Occurrence>) -> Vec<PlantImage> {
    occurrences
        .into_iter()
        .flat_map(|occurrence| occurrence.media)
        .filter(PlantImage::has_url)
        .collect()
}

/// English names only, trimmed, deduplicated, capped.
pub(crate) fn english_names(entries: Vec<Vernacular>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| entry.language.as_deref() == Some(ENGLISH))
        .map(|entry| entry.vernacular_name.trim().to_owned())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .take(MAX_VERNACULAR_NAMES)
        .collect()
}

/// First occurrence of every species, in API order.
///
/// Occurrences without a species name or species key cannot become plants
/// and are skipped.
pub(crate) fn first_per_species(occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
    let mut seen: HashSet<String> = HashSet::new();
    occurrences
        .into_iter()
        .filter(|occurrence| match (&occurrence.species, occurrence.species_key) {
            (Some(species), Some(_)) => seen.insert(species.clone()),
            _ => false,
        })
        .collect()
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
