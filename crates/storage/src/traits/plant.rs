use async_trait::async_trait;
use natura_core::{NewPlant, Plant};

use crate::error::StorageError;
use crate::rows::PlantUpsert;

/// Plant catalogue operations.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Get a plant by its storage id.
    async fn get_plant(&self, id: &str) -> Result<Option<Plant>, StorageError>;

    /// Exact, case-sensitive lookup by scientific name.
    async fn find_plant_by_scientific_name(
        &self,
        scientific_name: &str,
    ) -> Result<Option<Plant>, StorageError>;

    /// All plants, ordered by scientific name.
    async fn list_plants(&self) -> Result<Vec<Plant>, StorageError>;

    /// Merge-on-insert keyed by scientific name.
    ///
    /// Creates the plant with all of `input.common_names` when it is new,
    /// otherwise appends only the names it is missing. The external species
    /// key of an existing plant is never changed. Runs in one transaction.
    /// SQLite serializes upserts; on PostgreSQL a concurrent insert of the
    /// same new plant surfaces as `Duplicate`.
    async fn upsert_plant(&self, input: &NewPlant) -> Result<PlantUpsert, StorageError>;
}
