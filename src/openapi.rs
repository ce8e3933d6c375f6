//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::database::schema::types::{
    ApplicationStatus, OrderStatus, PaymentStatus, PayoutStatus, SenderRole, UserRole,
};
use crate::models::admin::AdminOverview;
use crate::models::catalog::{
    Category, CreateServiceRequest, ServiceResponse, ServiceSort, ServiceSummary,
    UpdateServiceRequest,
};
use crate::models::designer::{DesignerApplication, DesignerProfile, SubmitApplicationRequest};
use crate::models::order::{
    Brief, ChatTranscript, CreateMessageRequest, CreateOrderRequest, Message, OrderResponse,
    UpdateStatusRequest,
};
use crate::models::payment::{CreateHoldRequest, DesignerBalance, Payment};
use crate::models::user::UserRef;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::catalog::list_categories,
        crate::handlers::catalog::list_services,
        crate::handlers::catalog::get_service,
        crate::handlers::catalog::create_service,
        crate::handlers::catalog::update_service,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::create_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::orders::add_message,
        crate::handlers::payments::create_hold,
        crate::handlers::payments::capture_payment,
        crate::handlers::payments::refund_payment,
        crate::handlers::designers::list_applications,
        crate::handlers::designers::submit_application,
        crate::handlers::designers::approve_application,
        crate::handlers::designers::reject_application,
        crate::handlers::admin::overview,
    ),
    components(schemas(
        UserRole,
        OrderStatus,
        PaymentStatus,
        SenderRole,
        ApplicationStatus,
        PayoutStatus,
        Category,
        ServiceResponse,
        ServiceSummary,
        ServiceSort,
        CreateServiceRequest,
        UpdateServiceRequest,
        Brief,
        Message,
        ChatTranscript,
        OrderResponse,
        CreateOrderRequest,
        UpdateStatusRequest,
        CreateMessageRequest,
        Payment,
        DesignerBalance,
        CreateHoldRequest,
        DesignerApplication,
        DesignerProfile,
        SubmitApplicationRequest,
        AdminOverview,
        UserRef,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "catalog", description = "Services and categories"),
        (name = "orders", description = "Order lifecycle and chat"),
        (name = "payments", description = "Escrow ledger"),
        (name = "designers", description = "Designer application intake"),
        (name = "admin", description = "Dashboard aggregation"),
    ),
    info(
        title = "Marketplace API",
        description = "Commissioned visual-design marketplace: catalog, escrow orders, per-order chat"
    )
)]
pub struct ApiDoc;
