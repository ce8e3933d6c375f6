//! HTTP surface tests: the full router driven request-by-request over an
//! in-memory store, no network or database required.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use marketplace_api::app_state::AppState;
use marketplace_api::config::Config;
use marketplace_api::database::schema::types::UserRole;
use marketplace_api::models::catalog::CreateServiceRequest;
use marketplace_api::router::build_router;
use marketplace_api::store::{MemoryStore, Store};

struct TestApp {
    app: Router,
    store: Arc<MemoryStore>,
    service_id: Uuid,
    buyer_id: Uuid,
    designer_id: Uuid,
}

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        max_connections: 1,
        request_timeout: 5,
        log_level: "info".to_string(),
    }
}

async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());

    let buyer = store.seed_user("buyer-alias", UserRole::Buyer).await;
    let designer = store.seed_user("designer-alias", UserRole::Designer).await;
    let category = store.seed_category("Thumbnails", "thumbnails").await;

    let service = store
        .insert_service(&CreateServiceRequest {
            category_id: category.id,
            title: "YouTube thumbnail".to_string(),
            description_md: "High-CTR thumbnail design".to_string(),
            cover_url: None,
            format: Some("1280x720 PNG".to_string()),
            platform: Some("YouTube".to_string()),
            turnaround: Some("48h".to_string()),
            base_designer_price: 7000,
            platform_markup: 1900,
            assigned_designer_id: Some(designer.id),
            examples: vec![],
            reviews_enabled: true,
            is_active: true,
        })
        .await
        .unwrap();

    let app = build_router(AppState::new(test_config(), store.clone()));

    TestApp {
        app,
        store,
        service_id: service.id,
        buyer_id: buyer.id,
        designer_id: designer.id,
    }
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn order_body(test_app: &TestApp) -> Value {
    json!({
        "service_id": test_app.service_id,
        "buyer_id": test_app.buyer_id,
        "brief": {
            "goal": "Raise CTR",
            "platform": "YouTube",
            "format": "1920x1080",
            "deadline": "48h"
        }
    })
}

async fn place_order(test_app: &TestApp) -> Value {
    let response = test_app
        .app
        .clone()
        .oneshot(json_request("POST", "/api/orders", order_body(test_app)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn health_endpoint_responds() {
    let test_app = spawn_app().await;
    let response = test_app.app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn service_detail_returns_computed_total() {
    let test_app = spawn_app().await;
    let response = test_app
        .app
        .clone()
        .oneshot(get(&format!("/api/services/{}", test_app.service_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_price"], 8900);
}

#[tokio::test]
async fn missing_service_is_404() {
    let test_app = spawn_app().await;
    let response = test_app
        .app
        .clone()
        .oneshot(get(&format!("/api/services/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "RES_4001");
}

#[tokio::test]
async fn placing_an_order_returns_the_hydrated_record() {
    let test_app = spawn_app().await;
    let order = place_order(&test_app).await;

    assert_eq!(order["status"], "new");
    assert_eq!(order["total_price"], 8900);
    assert_eq!(order["designer"]["id"], json!(test_app.designer_id));
    assert_eq!(order["chat"]["messages"], json!([]));
    assert_eq!(order["payment"]["status"], "hold");
    assert_eq!(order["payment"]["amount_gross"], 8900);
}

#[tokio::test]
async fn ordering_an_unknown_service_is_404() {
    let test_app = spawn_app().await;
    let mut body = order_body(&test_app);
    body["service_id"] = json!(Uuid::new_v4());

    let response = test_app
        .app
        .clone()
        .oneshot(json_request("POST", "/api/orders", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn confirm_transition_captures_over_http() {
    let test_app = spawn_app().await;
    let order = place_order(&test_app).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/orders/{}/status", order_id),
            json!({"status": "awaiting_admin_confirm"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "awaiting_admin_confirm");
    assert_eq!(body["payment"]["status"], "captured");

    let balance = test_app
        .store
        .get_balance(test_app.designer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(balance.pending, 7000);
}

#[tokio::test]
async fn unknown_status_is_400_and_leaves_the_order_alone() {
    let test_app = spawn_app().await;
    let order = place_order(&test_app).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/orders/{}/status", order_id),
            json!({"status": "not_a_status"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VAL_3004");

    let reread = test_app
        .app
        .clone()
        .oneshot(get(&format!("/api/orders/{}", order_id)))
        .await
        .unwrap();
    let reread = body_json(reread).await;
    assert_eq!(reread["status"], "new");
}

#[tokio::test]
async fn capture_endpoint_is_idempotent() {
    let test_app = spawn_app().await;
    let order = place_order(&test_app).await;
    let payment_id = order["payment"]["id"].as_str().unwrap().to_string();

    let first = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/payments/{}/capture", payment_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/payments/{}/capture", payment_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let body = body_json(second).await;
    assert_eq!(body["status"], "captured");
    assert_eq!(body["id"], json!(payment_id));

    let balance = test_app
        .store
        .get_balance(test_app.designer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(balance.pending, 7000);
}

#[tokio::test]
async fn capture_of_unknown_payment_is_404() {
    let test_app = spawn_app().await;
    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/payments/{}/capture", Uuid::new_v4()),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn messages_append_and_missing_orders_404() {
    let test_app = spawn_app().await;
    let order = place_order(&test_app).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/orders/{}/messages", order_id),
            json!({"sender_role": "buyer", "body": "Added references to the brief"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let message = body_json(response).await;
    assert_eq!(message["sender_role"], "buyer");

    let missing = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/orders/{}/messages", Uuid::new_v4()),
            json!({"sender_role": "buyer", "body": "hello"}),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let empty_body = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/orders/{}/messages", order_id),
            json!({"sender_role": "buyer", "body": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(empty_body.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_listing_scopes_to_the_viewer() {
    let test_app = spawn_app().await;
    place_order(&test_app).await;

    let mine = test_app
        .app
        .clone()
        .oneshot(get(&format!(
            "/api/orders?role=buyer&user_id={}",
            test_app.buyer_id
        )))
        .await
        .unwrap();
    let mine = body_json(mine).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let others = test_app
        .app
        .clone()
        .oneshot(get(&format!(
            "/api/orders?role=buyer&user_id={}",
            Uuid::new_v4()
        )))
        .await
        .unwrap();
    let others = body_json(others).await;
    assert!(others.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn designer_application_flow_over_http() {
    let test_app = spawn_app().await;
    let candidate = test_app.store.seed_user("candidate", UserRole::Buyer).await;

    let invalid = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/designer-applications",
            json!({
                "user_id": candidate.id,
                "bio": "too short",
                "skills": ["Motion"],
                "portfolio_links": ["https://behance.net/sample"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let submitted = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/designer-applications",
            json!({
                "user_id": candidate.id,
                "bio": "Motion designer with five years of experience",
                "skills": ["Motion", "Video"],
                "portfolio_links": ["https://behance.net/sample"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(submitted.status(), StatusCode::OK);
    let application = body_json(submitted).await;
    assert_eq!(application["status"], "pending");
    let application_id = application["id"].as_str().unwrap().to_string();

    let approved = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/designer-applications/{}/approve", application_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(approved.status(), StatusCode::OK);

    let user = test_app
        .store
        .get_user(candidate.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, UserRole::Designer);
    assert!(test_app
        .store
        .get_balance(candidate.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn admin_overview_reports_the_rollup() {
    let test_app = spawn_app().await;
    let order = place_order(&test_app).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    test_app
        .app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/orders/{}/status", order_id),
            json!({"status": "in_work"}),
        ))
        .await
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(get("/api/admin/overview"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["orders_in_progress"], 1);
    assert_eq!(body["designer_applications_pending"], 0);
    assert_eq!(body["total_revenue"], 0);
    assert!(body["generated_at"].is_string());
}

#[tokio::test]
async fn catalog_listing_supports_filters() {
    let test_app = spawn_app().await;

    let all = test_app.app.clone().oneshot(get("/api/services")).await.unwrap();
    let all = body_json(all).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let filtered = test_app
        .app
        .clone()
        .oneshot(get("/api/services?platform=YouTube&price_from=8000&price_to=9000"))
        .await
        .unwrap();
    let filtered = body_json(filtered).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let out_of_range = test_app
        .app
        .clone()
        .oneshot(get("/api/services?price_to=100"))
        .await
        .unwrap();
    let out_of_range = body_json(out_of_range).await;
    assert!(out_of_range.as_array().unwrap().is_empty());
}
