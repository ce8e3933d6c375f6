use std::sync::Arc;

use crate::error::Result;
use crate::models::admin::AdminOverview;
use crate::store::Store;

/// Read-only dashboard rollup across orders, applications, payouts and
/// captured revenue. Recomputed from the store on every request.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn Store>,
}

impl AdminService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn overview(&self) -> Result<AdminOverview> {
        let counts = self.store.admin_counts().await?;
        Ok(AdminOverview::from_counts(counts))
    }
}
