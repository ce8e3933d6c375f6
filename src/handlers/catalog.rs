use axum::extract::{Path, Query, State};
use axum::response::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::catalog::{
    Category, CreateServiceRequest, ServiceFilter, ServiceResponse, UpdateServiceRequest,
};

/// List active categories in display order.
/// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "catalog",
    responses((status = 200, description = "Categories", body = [Category]))
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(Json(categories))
}

/// List services with catalog filters.
/// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "catalog",
    params(ServiceFilter),
    responses((status = 200, description = "Matching services", body = [ServiceResponse]))
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(filter): Query<ServiceFilter>,
) -> Result<Json<Vec<ServiceResponse>>> {
    let services = state.catalog_service.list_services(filter).await?;
    Ok(Json(services))
}

/// Fetch one service.
/// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "catalog",
    responses(
        (status = 200, description = "Service", body = ServiceResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>> {
    let service = state.catalog_service.get_service(id).await?;
    Ok(Json(service))
}

/// Create a service (admin).
/// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "catalog",
    request_body = CreateServiceRequest,
    responses(
        (status = 200, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<ServiceResponse>> {
    let service = state.catalog_service.create_service(payload).await?;
    Ok(Json(service))
}

/// Partially update a service (admin).
/// PATCH /api/services/{id}
#[utoipa::path(
    patch,
    path = "/api/services/{id}",
    tag = "catalog",
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>> {
    let service = state.catalog_service.update_service(id, payload).await?;
    Ok(Json(service))
}
