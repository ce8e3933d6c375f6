use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::{OrderStatus, SenderRole};
use crate::models::catalog::ServiceSummary;
use crate::models::payment::Payment;
use crate::models::user::UserRef;

/// Structured order brief filled in by the buyer at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Brief {
    #[validate(length(min = 3))]
    pub goal: String,

    #[validate(length(min = 2))]
    pub platform: String,

    #[validate(length(min = 2))]
    pub format: String,

    #[validate(length(min = 1))]
    pub deadline: String,

    #[serde(default)]
    pub references: Vec<String>,

    pub notes: Option<String>,
}

/// Order row as persisted. `total_price` is snapshotted at creation from
/// the service's price components and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub service_id: Uuid,
    pub buyer_id: Uuid,
    pub designer_id: Option<Uuid>,
    pub status: OrderStatus,
    pub brief: Brief,
    pub attachments: Vec<String>,
    pub total_price: i64,
    pub escrow_payment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_role: SenderRole,
    pub body: String,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTranscript {
    pub id: Uuid,
    /// Ascending by creation time; append-only, never edited or reordered.
    pub messages: Vec<Message>,
}

/// Hydrated order returned by the API: service summary, party aliases,
/// payment, and (on detail fetches) the full chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub status: OrderStatus,
    pub service_id: Uuid,
    pub service: Option<ServiceSummary>,
    pub buyer: Option<UserRef>,
    pub designer: Option<UserRef>,
    pub brief: Brief,
    pub attachments: Vec<String>,
    pub total_price: i64,
    pub payment: Option<Payment>,
    pub chat: Option<ChatTranscript>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub service_id: Uuid,
    pub buyer_id: Uuid,

    /// Explicit designer override; falls back to the service's assigned
    /// designer when absent.
    pub designer_id: Option<Uuid>,

    #[validate(nested)]
    pub brief: Brief,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub attachments: Vec<String>,
}

/// Status patch payload. Carried as a raw string so the closed enumeration
/// check happens in one place and unknown values produce a validation
/// error rather than a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessageRequest {
    pub sender_role: SenderRole,

    #[validate(length(min = 1, max = 5000))]
    pub body: String,

    #[serde(default)]
    #[validate(length(max = 5))]
    pub attachments: Vec<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// Optional status filter from the closed enumeration.
    pub status: Option<String>,
    /// Viewer role for scoping: buyer | designer
    pub role: Option<String>,
    /// Viewer id the role scopes to.
    pub user_id: Option<Uuid>,
}

/// Explicit order list filter, constructed deterministically from present
/// query fields only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub buyer_id: Option<Uuid>,
    pub designer_id: Option<Uuid>,
}

impl OrderFilter {
    /// Single source of truth for "which orders can this caller see":
    /// buyers are scoped to their own purchases, designers to their own
    /// assignments, anyone else (admin views) sees everything.
    pub fn for_viewer(role: Option<&str>, user_id: Option<Uuid>) -> Self {
        let mut filter = OrderFilter::default();
        match (role, user_id) {
            (Some("buyer"), Some(id)) => filter.buyer_id = Some(id),
            (Some("designer"), Some(id)) => filter.designer_id = Some(id),
            _ => {}
        }
        filter
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether an order is visible through this filter.
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(buyer_id) = self.buyer_id {
            if order.buyer_id != buyer_id {
                return false;
            }
        }
        if let Some(designer_id) = self.designer_id {
            if order.designer_id != Some(designer_id) {
                return false;
            }
        }
        true
    }
}
