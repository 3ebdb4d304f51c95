use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Admin account as stored. `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of an admin returned by login and verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminProfile {
    pub id: Uuid,
    pub username: String,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        AdminProfile {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}
