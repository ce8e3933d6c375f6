use axum::extract::{Path, Query, State};
use axum::response::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::order::{
    CreateMessageRequest, CreateOrderRequest, ListOrdersQuery, Message, OrderResponse,
    UpdateStatusRequest,
};

/// List orders, scoped to the viewer, newest first.
/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Orders visible to the viewer", body = [OrderResponse]),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = state.order_service.list(query).await?;
    Ok(Json(orders))
}

/// Fetch one order with its full chat transcript.
/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    responses(
        (status = 200, description = "Order detail", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>> {
    let order = state.order_service.get(id).await?;
    Ok(Json(order))
}

/// Place an order. Creates the order, its chat and the escrow hold in one
/// transaction.
/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>> {
    let order = state.order_service.create(payload).await?;
    Ok(Json(order))
}

/// Transition an order's status; escrow side effects apply on
/// `awaiting_admin_confirm` (capture) and `cancelled` (refund).
/// PATCH /api/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "orders",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let order = state.order_service.update_status(id, &payload.status).await?;
    Ok(Json(order))
}

/// Append a chat message and broadcast it to live subscribers.
/// POST /api/orders/{id}/messages
#[utoipa::path(
    post,
    path = "/api/orders/{id}/messages",
    tag = "orders",
    request_body = CreateMessageRequest,
    responses(
        (status = 200, description = "Message appended", body = Message),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn add_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateMessageRequest>,
) -> Result<Json<Message>> {
    let message = state.order_service.add_message(id, payload).await?;
    Ok(Json(message))
}
