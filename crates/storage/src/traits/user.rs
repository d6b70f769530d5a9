use async_trait::async_trait;
use natura_core::User;

use crate::error::StorageError;

/// Collection owners. Accounts are provisioned by migrations, not through here.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;
}
