use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::PaymentStatus;

/// Escrow record for one order. Exactly one payment exists per order
/// (unique order reference); it moves `hold -> captured | refunded` once.
///
/// `amount_net + platform_fee == amount_gross` at all times; the fee is
/// snapshotted at hold creation and never recomputed, even if the service's
/// markup changes later.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount_gross: i64,
    pub amount_net: i64,
    pub platform_fee: i64,
    pub status: PaymentStatus,
    pub provider: String,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-designer earnings ledger. `pending` grows only through payment
/// capture; moving pending to available is a payout concern handled
/// outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DesignerBalance {
    pub designer_id: Uuid,
    pub pending: i64,
    pub available: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHoldRequest {
    pub order_id: Uuid,

    #[validate(range(min = 1))]
    pub amount: i64,
}
