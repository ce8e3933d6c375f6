use axum::extract::{Path, State};
use axum::response::Json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::payment::{CreateHoldRequest, Payment};

/// Open the escrow hold for an order.
/// POST /api/payments/create-hold
#[utoipa::path(
    post,
    path = "/api/payments/create-hold",
    tag = "payments",
    request_body = CreateHoldRequest,
    responses(
        (status = 200, description = "Hold opened", body = Payment),
        (status = 404, description = "Order not found")
    )
)]
pub async fn create_hold(
    State(state): State<AppState>,
    Json(payload): Json<CreateHoldRequest>,
) -> Result<Json<Payment>> {
    payload.validate()?;
    let payment = state
        .escrow_service
        .create_hold(payload.order_id, payload.amount)
        .await?;
    Ok(Json(payment))
}

/// Capture a held payment. Idempotent: repeating the call returns the
/// already-captured record unchanged.
/// POST /api/payments/{id}/capture
#[utoipa::path(
    post,
    path = "/api/payments/{id}/capture",
    tag = "payments",
    responses(
        (status = 200, description = "Payment captured", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn capture_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>> {
    let payment = state.escrow_service.capture(id).await?;
    Ok(Json(payment))
}

/// Refund a held payment.
/// POST /api/payments/{id}/refund
#[utoipa::path(
    post,
    path = "/api/payments/{id}/refund",
    tag = "payments",
    responses(
        (status = 200, description = "Payment refunded", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn refund_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>> {
    let payment = state.escrow_service.refund(id).await?;
    Ok(Json(payment))
}
