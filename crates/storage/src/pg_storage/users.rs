//! UserStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use natura_core::User;

use crate::traits::UserStore;

#[async_trait]
impl UserStore for PgStorage {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let row: Option<(String, Option<String>, Option<String>)> =
            sqlx::query_as("SELECT id, email, user_name FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id, email, user_name)| User { id, email, user_name }))
    }
}
