use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future;
use futures_util::stream::{self, StreamExt};
use natura_core::{IMAGE_FANOUT_LIMIT, Plant, PlantImage};
use natura_gbif::GbifClient;
use natura_storage::StorageBackend;
use natura_storage::traits::{CollectionStore, PlantStore};
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::ServiceError;

/// Everything the collection page shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionView {
    /// Plants the user has collected, in collection order.
    pub collected: Vec<Plant>,
    /// The whole catalogue, ordered by scientific name.
    pub all_plants: Vec<Plant>,
    /// One image per plant, keyed by scientific name. Plants without a
    /// species key or without images are absent.
    pub images: HashMap<String, PlantImage>,
}

pub struct CollectionService {
    storage: Arc<StorageBackend>,
    gbif: Arc<GbifClient>,
    fanout: usize,
}

impl CollectionService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, gbif: Arc<GbifClient>) -> Self {
        Self { storage, gbif, fanout: IMAGE_FANOUT_LIMIT }
    }

    /// Caps concurrent image lookups.
    #[must_use]
    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout.max(1);
        self
    }

    /// Collected plants, the whole catalogue and a random image per plant.
    ///
    /// Image lookups run concurrently; a failed lookup is logged and leaves
    /// that plant without an image.
    pub async fn collection_view(&self, user_id: &str) -> Result<CollectionView, ServiceError> {
        let collected = self.storage.get_collection(user_id).await?;
        let all_plants = self.storage.list_plants().await?;

        let lookups: Vec<(&str, &str)> = all_plants
            .iter()
            .filter_map(|plant| {
                plant.gbif_species_key.as_deref().map(|key| (plant.scientific_name.as_str(), key))
            })
            .collect();

        let lookup_futures: Vec<_> = lookups
            .into_iter()
            .map(|(scientific_name, species_key)| async move {
                match self.gbif.find_images_for_species(species_key).await {
                    Ok(images) => {
                        pick_random(&images).map(|image| (scientific_name.to_owned(), image))
                    },
                    Err(e) => {
                        tracing::warn!(
                            plant = scientific_name,
                            species_key,
                            error = %e,
                            "image lookup failed"
                        );
                        None
                    },
                }
            })
            .collect();

        let images: HashMap<String, PlantImage> = stream::iter(lookup_futures)
            .buffer_unordered(self.fanout)
            .filter_map(future::ready)
            .collect()
            .await;

        tracing::debug!(
            user_id,
            collected = collected.len(),
            plants = all_plants.len(),
            images = images.len(),
            "built collection view"
        );
        Ok(CollectionView { collected, all_plants, images })
    }
}

/// Uniformly random image, `None` for an empty list.
fn pick_random(images: &[PlantImage]) -> Option<PlantImage> {
    images.choose(&mut rand::rng()).cloned()
}
