use serde::{Deserialize, Serialize};

/// Owner of a plant collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub user_name: Option<String>,
}
