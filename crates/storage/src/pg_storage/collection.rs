//! CollectionStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;

use crate::rows::PLANT_COLUMNS;
use crate::traits::CollectionStore;

#[async_trait]
impl CollectionStore for PgStorage {
    async fn add_to_collection(
        &self,
        user_id: &str,
        plant_id: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "INSERT INTO user_plants (user_id, plant_id) VALUES ($1, $2)
             ON CONFLICT (user_id, plant_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(plant_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_collection(&self, user_id: &str) -> Result<Vec<Plant>, StorageError> {
        self.fetch_plants(
            &format!(
                "SELECT {PLANT_COLUMNS} FROM plants p
                 JOIN user_plants up ON up.plant_id = p.id
                 WHERE up.user_id = $1
                 ORDER BY up.collected_at, p.scientific_name"
            ),
            "SELECT pn.plant_id, pn.name FROM plant_names pn
             JOIN user_plants up ON up.plant_id = pn.plant_id
             WHERE up.user_id = $1
             ORDER BY pn.plant_id, pn.position",
            Some(user_id),
        )
        .await
    }
}
