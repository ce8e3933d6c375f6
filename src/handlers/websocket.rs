use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::Result;

/// Subscribe to an order's live message stream.
/// GET /api/orders/{id}/chat/ws
///
/// The 404 check runs before the upgrade, so subscribing to a nonexistent
/// order fails like any other fetch of it would.
pub async fn order_chat_ws(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<Response> {
    state.order_service.get(id).await?;

    let hub = state.chat_hub.clone();
    Ok(ws.on_upgrade(move |socket| async move {
        hub.register_client(socket, id).await;
    }))
}
