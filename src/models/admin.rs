use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw counters read from the store in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminCounts {
    /// Orders in {in_work, on_review, revision, awaiting_admin_confirm}.
    pub active_orders: i64,
    pub pending_applications: i64,
    /// Payout requests still in `requested` state.
    pub requested_payouts: i64,
    /// Sum of gross amounts over all captured payments.
    pub captured_gross: i64,
}

/// Dashboard rollup, recomputed on every request; no caching, no
/// incremental maintenance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminOverview {
    pub orders_in_progress: i64,
    pub designer_applications_pending: i64,
    pub payout_requests: i64,
    pub total_revenue: i64,
    pub generated_at: DateTime<Utc>,
}

impl AdminOverview {
    pub fn from_counts(counts: AdminCounts) -> Self {
        Self {
            orders_in_progress: counts.active_orders,
            designer_applications_pending: counts.pending_applications,
            payout_requests: counts.requested_payouts,
            total_revenue: counts.captured_gross,
            generated_at: Utc::now(),
        }
    }
}
