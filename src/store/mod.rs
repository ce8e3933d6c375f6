//! Repository interface over the persistent store.
//!
//! All components read and write through [`Store`]; multi-step operations
//! (order creation, payment capture, application approval) are atomic
//! inside a single implementation method, so partial application is never
//! observable across the trait boundary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::schema::types::{ApplicationStatus, OrderStatus};
use crate::error::Result;
use crate::models::admin::AdminCounts;
use crate::models::catalog::{
    Category, CreateServiceRequest, Service, ServiceFilter, UpdateServiceRequest,
};
use crate::models::designer::{DesignerApplication, DesignerProfile, SubmitApplicationRequest};
use crate::models::order::{Brief, Message, Order, OrderFilter, OrderResponse};
use crate::models::payment::{DesignerBalance, Payment};
use crate::models::user::User;

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Input for the transactional order creation. Amounts are precomputed by
/// the caller: `total_price` is the service's base + markup snapshot and
/// `platform_fee` the markup captured for the escrow hold.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub service_id: Uuid,
    pub buyer_id: Uuid,
    pub designer_id: Option<Uuid>,
    pub brief: Brief,
    pub attachments: Vec<String>,
    pub total_price: i64,
    pub platform_fee: i64,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_role: crate::database::schema::types::SenderRole,
    pub body: String,
    pub attachments: Vec<String>,
}

#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    // Catalog
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn get_service(&self, id: Uuid) -> Result<Option<Service>>;
    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>>;
    async fn insert_service(&self, req: &CreateServiceRequest) -> Result<Service>;
    async fn update_service(
        &self,
        id: Uuid,
        patch: &UpdateServiceRequest,
    ) -> Result<Option<Service>>;

    // Orders. `create_order` inserts the order, its chat and the escrow
    // hold together; either all three commit or none do.
    async fn create_order(&self, new: NewOrder) -> Result<Order>;
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>>;
    async fn get_order_detail(&self, id: Uuid) -> Result<Option<OrderResponse>>;
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<OrderResponse>>;
    async fn set_order_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>>;

    // Chat. The order is assumed to exist; the chat row is created lazily
    // if it is somehow missing.
    async fn append_message(&self, order_id: Uuid, message: NewMessage) -> Result<Message>;

    // Escrow
    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>>;
    async fn get_payment_for_order(&self, order_id: Uuid) -> Result<Option<Payment>>;
    /// Upsert the hold keyed by the unique order reference and write the
    /// payment id back onto the order. Retry-safe: a second call updates
    /// the amounts instead of duplicating the record.
    async fn upsert_hold(
        &self,
        order_id: Uuid,
        amount_gross: i64,
        platform_fee: i64,
    ) -> Result<Payment>;
    /// Transition `hold -> captured` and credit the order's designer with
    /// the net amount, in one transaction. A payment that is no longer in
    /// `hold` is returned unchanged and nothing is credited.
    async fn capture_payment(&self, id: Uuid) -> Result<Option<Payment>>;
    /// Transition `hold -> refunded`. A payment that is no longer in
    /// `hold` is returned unchanged.
    async fn refund_payment(&self, id: Uuid) -> Result<Option<Payment>>;
    async fn get_balance(&self, designer_id: Uuid) -> Result<Option<DesignerBalance>>;

    // Designer intake
    async fn insert_application(
        &self,
        req: &SubmitApplicationRequest,
    ) -> Result<DesignerApplication>;
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<DesignerApplication>>;
    async fn get_application(&self, id: Uuid) -> Result<Option<DesignerApplication>>;
    /// Approve in one transaction: application status, profile upsert,
    /// role promotion and zero-balance provisioning commit together.
    async fn approve_application(&self, id: Uuid) -> Result<Option<DesignerApplication>>;
    async fn reject_application(&self, id: Uuid) -> Result<Option<DesignerApplication>>;
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<DesignerProfile>>;

    // Admin
    async fn admin_counts(&self) -> Result<AdminCounts>;
}
