use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, Result};
use crate::models::catalog::{
    Category, CreateServiceRequest, ServiceFilter, ServiceResponse, UpdateServiceRequest,
};
use crate::store::Store;

/// Catalog of services and categories. The buyer-facing total is always
/// computed from the hidden designer price plus the platform markup.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.store.list_categories().await
    }

    pub async fn list_services(&self, filter: ServiceFilter) -> Result<Vec<ServiceResponse>> {
        let services = self.store.list_services(&filter).await?;
        Ok(services.into_iter().map(ServiceResponse::from).collect())
    }

    pub async fn get_service(&self, id: Uuid) -> Result<ServiceResponse> {
        let service = self
            .store
            .get_service(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Service"))?;
        Ok(service.into())
    }

    pub async fn create_service(&self, req: CreateServiceRequest) -> Result<ServiceResponse> {
        req.validate()?;
        let service = self.store.insert_service(&req).await?;
        info!(service_id = %service.id, title = %service.title, "Service created");
        Ok(service.into())
    }

    pub async fn update_service(
        &self,
        id: Uuid,
        patch: UpdateServiceRequest,
    ) -> Result<ServiceResponse> {
        patch.validate()?;
        let service = self
            .store
            .update_service(id, &patch)
            .await?
            .ok_or_else(|| ApiError::not_found("Service"))?;
        info!(service_id = %service.id, "Service updated");
        Ok(service.into())
    }
}
