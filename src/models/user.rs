use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::database::schema::types::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub display_alias: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Minimal user projection attached to orders. Buyers only ever see the
/// designer's display alias, never the underlying account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRef {
    pub id: Uuid,
    pub display_alias: String,
}

impl From<User> for UserRef {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_alias: user.display_alias,
        }
    }
}
