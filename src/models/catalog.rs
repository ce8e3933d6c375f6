use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub is_active: bool,
}

/// A catalog offering. The price shown to buyers is always
/// `base_designer_price + platform_markup`, computed on read and never
/// stored, so the two components cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description_md: String,
    pub cover_url: Option<String>,
    pub format: Option<String>,
    pub platform: Option<String>,
    pub turnaround: Option<String>,
    pub base_designer_price: i64,
    pub platform_markup: i64,
    pub assigned_designer_id: Option<Uuid>,
    pub is_active: bool,
    pub examples: Vec<String>,
    pub reviews_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn total_price(&self) -> i64 {
        self.base_designer_price + self.platform_markup
    }
}

/// Service as returned by the catalog endpoints, with the computed total.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description_md: String,
    pub cover_url: Option<String>,
    pub format: Option<String>,
    pub platform: Option<String>,
    pub turnaround: Option<String>,
    pub base_designer_price: i64,
    pub platform_markup: i64,
    pub total_price: i64,
    pub assigned_designer_id: Option<Uuid>,
    pub is_active: bool,
    pub examples: Vec<String>,
    pub reviews_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        let total_price = service.total_price();
        Self {
            id: service.id,
            category_id: service.category_id,
            title: service.title,
            description_md: service.description_md,
            cover_url: service.cover_url,
            format: service.format,
            platform: service.platform,
            turnaround: service.turnaround,
            base_designer_price: service.base_designer_price,
            platform_markup: service.platform_markup,
            total_price,
            assigned_designer_id: service.assigned_designer_id,
            is_active: service.is_active,
            examples: service.examples,
            reviews_enabled: service.reviews_enabled,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}

/// Compact service projection embedded in order responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceSummary {
    pub id: Uuid,
    pub title: String,
    pub cover_url: Option<String>,
    pub platform: Option<String>,
    pub format: Option<String>,
}

impl From<&Service> for ServiceSummary {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            title: service.title.clone(),
            cover_url: service.cover_url.clone(),
            platform: service.platform.clone(),
            format: service.format.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    pub category_id: Uuid,

    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description_md: String,

    pub cover_url: Option<String>,
    pub format: Option<String>,
    pub platform: Option<String>,
    pub turnaround: Option<String>,

    #[validate(range(min = 0))]
    pub base_designer_price: i64,

    #[validate(range(min = 0))]
    pub platform_markup: i64,

    pub assigned_designer_id: Option<Uuid>,

    #[serde(default)]
    pub examples: Vec<String>,

    #[serde(default = "default_true")]
    pub reviews_enabled: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description_md: Option<String>,

    pub cover_url: Option<String>,
    pub format: Option<String>,
    pub platform: Option<String>,
    pub turnaround: Option<String>,

    #[validate(range(min = 0))]
    pub base_designer_price: Option<i64>,

    #[validate(range(min = 0))]
    pub platform_markup: Option<i64>,

    pub assigned_designer_id: Option<Uuid>,
    pub examples: Option<Vec<String>>,
    pub reviews_enabled: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Catalog query parameters. Fields left out of the request simply do not
/// constrain the result set; the query is built from present fields only.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ServiceFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub price_from: Option<i64>,
    pub price_to: Option<i64>,
    #[serde(default)]
    pub sort: ServiceSort,
}
