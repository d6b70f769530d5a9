//! PlantStore implementation for SqliteStorage.

use super::*;

use async_trait::async_trait;
use natura_core::NewPlant;
use sqlx::{Sqlite, Transaction};

use crate::rows::{PLANT_COLUMNS, PlantUpsert};
use crate::traits::PlantStore;

#[async_trait]
impl PlantStore for SqliteStorage {
    async fn get_plant(&self, id: &str) -> Result<Option<Plant>, StorageError> {
        let plants = self
            .fetch_plants(
                &format!("SELECT {PLANT_COLUMNS} FROM plants p WHERE p.id = ?"),
                "SELECT plant_id, name FROM plant_names WHERE plant_id = ? ORDER BY position",
                Some(id),
            )
            .await?;
        Ok(plants.into_iter().next())
    }

    async fn find_plant_by_scientific_name(
        &self,
        scientific_name: &str,
    ) -> Result<Option<Plant>, StorageError> {
        let plants = self
            .fetch_plants(
                &format!("SELECT {PLANT_COLUMNS} FROM plants p WHERE p.scientific_name = ?"),
                "SELECT pn.plant_id, pn.name FROM plant_names pn
                 JOIN plants p ON p.id = pn.plant_id
                 WHERE p.scientific_name = ?
                 ORDER BY pn.position",
                Some(scientific_name),
            )
            .await?;
        Ok(plants.into_iter().next())
    }

    async fn list_plants(&self) -> Result<Vec<Plant>, StorageError> {
        self.fetch_plants(
            &format!("SELECT {PLANT_COLUMNS} FROM plants p ORDER BY p.scientific_name"),
            "SELECT plant_id, name FROM plant_names ORDER BY plant_id, position",
            None,
        )
        .await
    }

    async fn upsert_plant(&self, input: &NewPlant) -> Result<PlantUpsert, StorageError> {
        // Take the write lock up front. A deferred transaction that reads
        // first cannot wait for the lock later and fails with SQLITE_BUSY.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let existing: Option<(String, Option<String>)> =
            sqlx::query_as("SELECT id, gbif_species_key FROM plants WHERE scientific_name = ?")
                .bind(&input.scientific_name)
                .fetch_optional(&mut *tx)
                .await?;

        let upsert = if let Some((id, gbif_species_key)) = existing {
            let names: Vec<String> = sqlx::query_scalar(
                "SELECT name FROM plant_names WHERE plant_id = ? ORDER BY position",
            )
            .bind(&id)
            .fetch_all(&mut *tx)
            .await?;
            let first_position = names.len();

            let mut plant =
                Plant::new(id, input.scientific_name.clone(), names, gbif_species_key);
            let added_names = plant.add_missing_common_names(&input.common_names);
            insert_names(&mut tx, &plant.id, &added_names, first_position).await?;

            PlantUpsert { plant, created: false, added_names }
        } else {
            let plant = Plant::new(
                uuid::Uuid::new_v4().to_string(),
                input.scientific_name.clone(),
                input.common_names.clone(),
                input.gbif_species_key.clone(),
            );

            sqlx::query("INSERT INTO plants (id, scientific_name, gbif_species_key) VALUES (?, ?, ?)")
                .bind(&plant.id)
                .bind(&plant.scientific_name)
                .bind(&plant.gbif_species_key)
                .execute(&mut *tx)
                .await?;
            insert_names(&mut tx, &plant.id, plant.common_names(), 0).await?;

            PlantUpsert { added_names: plant.common_names().to_vec(), plant, created: true }
        };

        tx.commit().await?;
        Ok(upsert)
    }
}

async fn insert_names(
    tx: &mut Transaction<'_, Sqlite>,
    plant_id: &str,
    names: &[String],
    first_position: usize,
) -> Result<(), StorageError> {
    for (offset, name) in names.iter().enumerate() {
        let position = i64::try_from(first_position.saturating_add(offset)).unwrap_or(i64::MAX);
        sqlx::query("INSERT INTO plant_names (id, plant_id, name, position) VALUES (?, ?, ?, ?)")
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(plant_id)
            .bind(name)
            .bind(position)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
