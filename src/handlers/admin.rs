use axum::extract::State;
use axum::response::Json;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::admin::AdminOverview;

/// Aggregated dashboard metrics, recomputed on every request.
/// GET /api/admin/overview
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    tag = "admin",
    responses((status = 200, description = "Dashboard metrics", body = AdminOverview))
)]
pub async fn overview(State(state): State<AppState>) -> Result<Json<AdminOverview>> {
    let overview = state.admin_service.overview().await?;
    Ok(Json(overview))
}
