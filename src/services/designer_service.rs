use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::ApplicationStatus;
use crate::error::{ApiError, Result};
use crate::models::designer::{DesignerApplication, SubmitApplicationRequest};
use crate::store::Store;

/// Designer candidate intake and moderation.
#[derive(Clone)]
pub struct DesignerService {
    store: Arc<dyn Store>,
}

impl DesignerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, req: SubmitApplicationRequest) -> Result<DesignerApplication> {
        req.validate()?;
        let application = self.store.insert_application(&req).await?;
        info!(
            application_id = %application.id,
            user_id = %application.user_id,
            "Designer application submitted"
        );
        Ok(application)
    }

    pub async fn list(&self, raw_status: Option<&str>) -> Result<Vec<DesignerApplication>> {
        let status = match raw_status {
            Some(raw) => Some(
                raw.parse::<ApplicationStatus>()
                    .map_err(|_| ApiError::unknown_status(raw))?,
            ),
            None => None,
        };
        self.store.list_applications(status).await
    }

    /// Approve a pending application. Four writes commit together: the
    /// application status, the designer profile, the role promotion, and
    /// a zero-balance ledger row.
    pub async fn approve(&self, id: Uuid) -> Result<DesignerApplication> {
        let application = self
            .store
            .approve_application(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Application"))?;
        info!(
            application_id = %id,
            user_id = %application.user_id,
            "Designer application approved; profile and balance provisioned"
        );
        Ok(application)
    }

    /// Reject an application. Only the status changes; nothing is
    /// provisioned.
    pub async fn reject(&self, id: Uuid) -> Result<DesignerApplication> {
        let application = self
            .store
            .reject_application(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Application"))?;
        info!(application_id = %id, "Designer application rejected");
        Ok(application)
    }
}
