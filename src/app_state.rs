//! Application state shared across all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    AdminService, CatalogService, ChatHub, DesignerService, EscrowService, OrderService,
};
use crate::store::Store;

/// Application state shared across handlers.
///
/// All services talk to the same [`Store`]; swapping the store (Postgres in
/// production, in-memory in tests) rewires the whole state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
    pub escrow_service: EscrowService,
    pub designer_service: DesignerService,
    pub admin_service: AdminService,
    pub chat_hub: ChatHub,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        let chat_hub = ChatHub::new();
        let escrow_service = EscrowService::new(store.clone());
        let order_service =
            OrderService::new(store.clone(), escrow_service.clone(), chat_hub.clone());

        Self {
            config,
            catalog_service: CatalogService::new(store.clone()),
            order_service,
            escrow_service,
            designer_service: DesignerService::new(store.clone()),
            admin_service: AdminService::new(store),
            chat_hub,
        }
    }
}

impl axum::extract::FromRef<AppState> for ChatHub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat_hub.clone()
    }
}
