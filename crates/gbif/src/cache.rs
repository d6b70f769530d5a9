//! Sliding-expiration cache for image lookups.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use natura_core::{IMAGE_CACHE_MAX_ENTRIES, IMAGE_CACHE_TTL_SECS, PlantImage};

/// Image lists keyed by GBIF species key.
///
/// Entries expire after `ttl` without access; every read resets the timer.
/// Cloning shares the underlying cache.
#[derive(Clone)]
pub struct ImageCache {
    inner: Cache<String, Arc<Vec<PlantImage>>>,
    ttl: Duration,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("entries", &self.inner.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(IMAGE_CACHE_TTL_SECS))
    }
}

impl ImageCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner =
            Cache::builder().max_capacity(IMAGE_CACHE_MAX_ENTRIES).time_to_idle(ttl).build();
        Self { inner, ttl }
    }

    pub async fn get(&self, species_key: &str) -> Option<Arc<Vec<PlantImage>>> {
        self.inner.get(species_key).await
    }

    pub async fn insert(&self, species_key: &str, images: Vec<PlantImage>) {
        self.inner.insert(species_key.to_owned(), Arc::new(images)).await;
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}
