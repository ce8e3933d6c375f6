//! Router configuration.

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::handlers::{admin, catalog, designers, health, orders, payments, websocket};
use crate::middleware;
use crate::openapi;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = std::time::Duration::from_secs(app_state.config.request_timeout);

    let api = Router::new()
        // Catalog
        .route("/categories", get(catalog::list_categories))
        .route(
            "/services",
            get(catalog::list_services).post(catalog::create_service),
        )
        .route(
            "/services/{id}",
            get(catalog::get_service).patch(catalog::update_service),
        )
        // Orders and chat
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", patch(orders::update_order_status))
        .route("/orders/{id}/messages", post(orders::add_message))
        .route("/orders/{id}/chat/ws", get(websocket::order_chat_ws))
        // Escrow
        .route("/payments/create-hold", post(payments::create_hold))
        .route("/payments/{id}/capture", post(payments::capture_payment))
        .route("/payments/{id}/refund", post(payments::refund_payment))
        // Designer intake
        .route(
            "/designer-applications",
            get(designers::list_applications).post(designers::submit_application),
        )
        .route(
            "/designer-applications/{id}/approve",
            post(designers::approve_application),
        )
        .route(
            "/designer-applications/{id}/reject",
            post(designers::reject_application),
        )
        // Admin
        .route("/admin/overview", get(admin::overview));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .merge(
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(
                    middleware::request_logger_middleware,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
