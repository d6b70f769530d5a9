use async_trait::async_trait;
use natura_core::Plant;

use crate::error::StorageError;

/// User collection memberships.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Add a plant to a user's collection.
    ///
    /// Returns `true` when a membership was created, `false` when the user
    /// had already collected the plant.
    async fn add_to_collection(&self, user_id: &str, plant_id: &str)
    -> Result<bool, StorageError>;

    /// Plants collected by a user, in collection order.
    async fn get_collection(&self, user_id: &str) -> Result<Vec<Plant>, StorageError>;
}
