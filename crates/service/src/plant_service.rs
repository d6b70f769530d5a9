use std::sync::Arc;

use natura_core::{IdentifiedPlant, NewPlant};
use natura_gbif::{GbifClient, SeedFilter};
use natura_identify::PlantIdentifier;
use natura_storage::{PlantUpsert, StorageBackend};
use natura_storage::traits::{CollectionStore, PlantStore, UserStore};

use crate::ServiceError;

/// A photo to identify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw image bytes uploaded by the client.
    Bytes(Vec<u8>),
    /// A publicly reachable image URL.
    Url(String),
}

/// Outcome of a seed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedImport {
    /// Distinct species returned by the seed query.
    pub species: usize,
    /// Plants that did not exist before.
    pub created: usize,
    /// Common names appended across all plants.
    pub names_added: usize,
}

pub struct PlantService {
    storage: Arc<StorageBackend>,
    identifier: Arc<dyn PlantIdentifier>,
    gbif: Arc<GbifClient>,
}

impl PlantService {
    #[must_use]
    pub fn new(
        storage: Arc<StorageBackend>,
        identifier: Arc<dyn PlantIdentifier>,
        gbif: Arc<GbifClient>,
    ) -> Self {
        Self { storage, identifier, gbif }
    }

    pub async fn identify(
        &self,
        source: ImageSource,
    ) -> Result<Option<IdentifiedPlant>, ServiceError> {
        let identified = match source {
            ImageSource::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(ServiceError::InvalidInput("image body is empty".to_owned()));
                }
                self.identifier.identify_bytes(bytes).await?
            },
            ImageSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(ServiceError::InvalidInput("image url is empty".to_owned()));
                }
                self.identifier.identify_url(&url).await?
            },
        };
        Ok(identified)
    }

    /// Identifies a photo, stores the plant and adds it to the user's collection.
    ///
    /// Returns the names to show for the plant, or `None` when no species was
    /// recognized. Collecting the same plant again is a no-op.
    pub async fn identify_and_collect(
        &self,
        source: ImageSource,
        user_id: &str,
    ) -> Result<Option<Vec<String>>, ServiceError> {
        let Some(identified) = self.identify(source).await? else {
            tracing::info!(user_id, "no species identified");
            return Ok(None);
        };

        let display_names = identified.display_names();
        let upsert = self.save_plant(&NewPlant::from(identified)).await?;
        let added = self.collect(user_id, &upsert.plant.id).await?;

        tracing::info!(
            user_id,
            plant = %upsert.plant.scientific_name,
            created = upsert.created,
            names_added = upsert.added_names.len(),
            newly_collected = added,
            "identified plant"
        );
        Ok(Some(display_names))
    }

    /// Merge-on-insert by scientific name.
    ///
    /// On PostgreSQL a concurrent insert of the same new plant loses the
    /// unique-index race with `Duplicate`; the second attempt then finds the
    /// winner's row and merges into it.
    pub async fn save_plant(&self, input: &NewPlant) -> Result<PlantUpsert, ServiceError> {
        if input.scientific_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("scientific name is empty".to_owned()));
        }
        match self.storage.upsert_plant(input).await {
            Ok(upsert) => Ok(upsert),
            Err(e) if e.is_duplicate() => {
                tracing::debug!(
                    plant = %input.scientific_name,
                    error = %e,
                    "concurrent insert, merging into existing plant"
                );
                Ok(self.storage.upsert_plant(input).await?)
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Adds a plant to a user's collection.
    ///
    /// Returns `false` when the user already had it.
    pub async fn collect(&self, user_id: &str, plant_id: &str) -> Result<bool, ServiceError> {
        if self.storage.get_user(user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("user {user_id}")));
        }
        match self.storage.add_to_collection(user_id, plant_id).await {
            Ok(added) => Ok(added),
            Err(e) => {
                tracing::error!(user_id, plant_id, error = %e, "failed to update collection");
                Err(e.into())
            },
        }
    }

    /// Populates the catalogue from GBIF occurrences matching `filter`.
    ///
    /// Every species becomes a plant keyed by its species name, with the
    /// species key as external id and its English vernacular names as common
    /// names. A failed name lookup stores the plant without names.
    pub async fn import_seed_data(&self, filter: &SeedFilter) -> Result<SeedImport, ServiceError> {
        let occurrences = self.gbif.get_seed_occurrences(filter).await?;
        let mut report = SeedImport::default();

        for occurrence in occurrences {
            let (Some(species), Some(species_key)) = (occurrence.species, occurrence.species_key)
            else {
                continue;
            };

            let common_names = match self.gbif.find_vernacular_names(species_key).await {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!(%species, species_key, error = %e, "vernacular lookup failed");
                    Vec::new()
                },
            };

            let upsert = self
                .save_plant(&NewPlant {
                    scientific_name: species,
                    common_names,
                    gbif_species_key: Some(species_key.to_string()),
                })
                .await?;

            report.species += 1;
            report.created += usize::from(upsert.created);
            report.names_added += upsert.added_names.len();
        }

        tracing::info!(
            species = report.species,
            created = report.created,
            names_added = report.names_added,
            "seed import finished"
        );
        Ok(report)
    }
}
