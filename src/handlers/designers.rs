use axum::extract::{Path, Query, State};
use axum::response::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::designer::{
    DesignerApplication, ListApplicationsQuery, SubmitApplicationRequest,
};

/// List designer applications, optionally filtered by status.
/// GET /api/designer-applications
#[utoipa::path(
    get,
    path = "/api/designer-applications",
    tag = "designers",
    params(ListApplicationsQuery),
    responses((status = 200, description = "Applications", body = [DesignerApplication]))
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<DesignerApplication>>> {
    let applications = state
        .designer_service
        .list(query.status.as_deref())
        .await?;
    Ok(Json(applications))
}

/// Submit a designer application.
/// POST /api/designer-applications
#[utoipa::path(
    post,
    path = "/api/designer-applications",
    tag = "designers",
    request_body = SubmitApplicationRequest,
    responses(
        (status = 200, description = "Application submitted", body = DesignerApplication),
        (status = 400, description = "Validation error")
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(payload): Json<SubmitApplicationRequest>,
) -> Result<Json<DesignerApplication>> {
    let application = state.designer_service.submit(payload).await?;
    Ok(Json(application))
}

/// Approve an application, provisioning the designer profile, role and
/// balance in one atomic operation.
/// POST /api/designer-applications/{id}/approve
#[utoipa::path(
    post,
    path = "/api/designer-applications/{id}/approve",
    tag = "designers",
    responses(
        (status = 200, description = "Application approved", body = DesignerApplication),
        (status = 404, description = "Application not found")
    )
)]
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DesignerApplication>> {
    let application = state.designer_service.approve(id).await?;
    Ok(Json(application))
}

/// Reject an application; only the status changes.
/// POST /api/designer-applications/{id}/reject
#[utoipa::path(
    post,
    path = "/api/designer-applications/{id}/reject",
    tag = "designers",
    responses(
        (status = 200, description = "Application rejected", body = DesignerApplication),
        (status = 404, description = "Application not found")
    )
)]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DesignerApplication>> {
    let application = state.designer_service.reject(id).await?;
    Ok(Json(application))
}
