use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::ApplicationStatus;

/// Designer candidate intake record. `pending -> approved | rejected`,
/// terminal either way; there is no re-submission path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DesignerApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub bio: String,
    pub skills: Vec<String>,
    pub portfolio_links: Vec<String>,
    pub portfolio_files: Vec<String>,
    pub rate_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DesignerProfile {
    pub user_id: Uuid,
    pub bio: String,
    pub skills: Vec<String>,
    pub portfolio_links: Vec<String>,
    pub portfolio_files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitApplicationRequest {
    pub user_id: Uuid,

    #[validate(length(min = 10))]
    pub bio: String,

    #[validate(length(min = 1))]
    pub skills: Vec<String>,

    #[validate(length(min = 1))]
    pub portfolio_links: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub portfolio_files: Vec<String>,

    pub rate_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListApplicationsQuery {
    /// Optional status filter: pending | approved | rejected
    pub status: Option<String>,
}
