//! End-to-end order lifecycle scenarios driven through the service layer
//! over a fresh in-memory store per test.

use std::sync::Arc;

use uuid::Uuid;

use marketplace_api::database::schema::types::{
    ApplicationStatus, OrderStatus, PaymentStatus, SenderRole, UserRole,
};
use marketplace_api::models::catalog::{CreateServiceRequest, UpdateServiceRequest};
use marketplace_api::models::designer::SubmitApplicationRequest;
use marketplace_api::models::order::{Brief, CreateMessageRequest, CreateOrderRequest};
use marketplace_api::services::{
    AdminService, CatalogService, ChatHub, DesignerService, EscrowService, OrderService,
};
use marketplace_api::store::{MemoryStore, Store};

struct World {
    store: Arc<MemoryStore>,
    catalog: CatalogService,
    orders: OrderService,
    escrow: EscrowService,
    designers: DesignerService,
    admin: AdminService,
    service_id: Uuid,
    buyer_id: Uuid,
    designer_id: Uuid,
}

async fn world() -> World {
    let store = Arc::new(MemoryStore::new());
    let chat_hub = ChatHub::new();
    let escrow = EscrowService::new(store.clone());
    let orders = OrderService::new(store.clone(), escrow.clone(), chat_hub);
    let catalog = CatalogService::new(store.clone());
    let designers = DesignerService::new(store.clone());
    let admin = AdminService::new(store.clone());

    let buyer = store.seed_user("buyer-alias", UserRole::Buyer).await;
    let designer = store.seed_user("designer-alias", UserRole::Designer).await;
    let category = store.seed_category("Thumbnails", "thumbnails").await;

    let service = catalog
        .create_service(CreateServiceRequest {
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

    World {
        store,
        catalog,
        orders,
        escrow,
        designers,
        admin,
        service_id: service.id,
        buyer_id: buyer.id,
        designer_id: designer.id,
    }
}

fn brief() -> Brief {
    Brief {
        goal: "Raise CTR".to_string(),
        platform: "YouTube".to_string(),
        format: "1920x1080".to_string(),
        deadline: "48h".to_string(),
        references: vec![],
        notes: None,
    }
}

fn order_request(world: &World) -> CreateOrderRequest {
    CreateOrderRequest {
        service_id: world.service_id,
        buyer_id: world.buyer_id,
        designer_id: None,
        brief: brief(),
        attachments: vec![],
    }
}

// Scenario 1: basePrice=7000, markup=1900 -> totalPrice=8900.
#[tokio::test]
async fn service_total_price_is_computed() {
    let world = world().await;
    let service = world.catalog.get_service(world.service_id).await.unwrap();
    assert_eq!(service.total_price, 8900);
}

// Scenario 2: placing an order without a designerId falls back to the
// service's assigned designer and provisions chat + hold.
#[tokio::test]
async fn placing_an_order_provisions_everything() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.total_price, 8900);
    assert_eq!(order.designer.unwrap().id, world.designer_id);
    assert!(order.chat.unwrap().messages.is_empty());

    let payment = order.payment.unwrap();
    assert_eq!(payment.amount_gross, 8900);
    assert_eq!(payment.status, PaymentStatus::Hold);
}

// Scenario 3: awaiting_admin_confirm captures the payment and credits the
// designer's pending balance with the net amount.
#[tokio::test]
async fn confirmation_captures_and_credits_net() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    let updated = world
        .orders
        .update_status(order.id, "awaiting_admin_confirm")
        .await
        .unwrap();
    assert_eq!(updated.payment.unwrap().status, PaymentStatus::Captured);

    let balance = world
        .store
        .get_balance(world.designer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(balance.pending, 8900 - 1900);
}

// Scenario 4: capturing the same payment again returns the identical
// record and leaves the balance untouched.
#[tokio::test]
async fn repeated_capture_is_a_no_op() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();
    let payment_id = order.payment.unwrap().id;

    let first = world.escrow.capture(payment_id).await.unwrap();
    let second = world.escrow.capture(payment_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.status, PaymentStatus::Captured);
    assert_eq!(second.status, PaymentStatus::Captured);

    let balance = world
        .store
        .get_balance(world.designer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(balance.pending, 7000);
}

// Scenario 5: a status outside the closed enumeration is rejected and the
// order is left unchanged.
#[tokio::test]
async fn bogus_status_is_rejected() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    let err = world
        .orders
        .update_status(order.id, "not_a_status")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown status"));

    let unchanged = world.orders.get(order.id).await.unwrap();
    assert_eq!(unchanged.status, OrderStatus::New);
    assert_eq!(unchanged.payment.unwrap().status, PaymentStatus::Hold);
}

// Scenario 6: rejection flips the status and provisions nothing.
#[tokio::test]
async fn rejection_provisions_nothing() {
    let world = world().await;
    let candidate = world.store.seed_user("candidate", UserRole::Buyer).await;

    let application = world
        .designers
        .submit(SubmitApplicationRequest {
            user_id: candidate.id,
            bio: "Motion designer with five years of experience".to_string(),
            skills: vec!["Motion".to_string()],
            portfolio_links: vec!["https://behance.net/sample".to_string()],
            portfolio_files: vec![],
            rate_notes: None,
        })
        .await
        .unwrap();

    let rejected = world.designers.reject(application.id).await.unwrap();
    assert_eq!(rejected.status, ApplicationStatus::Rejected);
    assert!(world.store.get_profile(candidate.id).await.unwrap().is_none());
    assert_eq!(
        world.store.get_user(candidate.id).await.unwrap().unwrap().role,
        UserRole::Buyer
    );
}

#[tokio::test]
async fn cancellation_refunds_the_hold() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    let updated = world.orders.update_status(order.id, "cancelled").await.unwrap();
    assert_eq!(updated.status, OrderStatus::Cancelled);
    assert_eq!(updated.payment.unwrap().status, PaymentStatus::Refunded);

    // Nothing was ever credited.
    assert!(world
        .store
        .get_balance(world.designer_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn order_price_is_a_creation_time_snapshot() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    world
        .catalog
        .update_service(
            world.service_id,
            UpdateServiceRequest {
                base_designer_price: Some(50000),
                platform_markup: Some(10000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The catalog shows the new total, the order keeps the old one.
    let service = world.catalog.get_service(world.service_id).await.unwrap();
    assert_eq!(service.total_price, 60000);

    let reread = world.orders.get(order.id).await.unwrap();
    assert_eq!(reread.total_price, 8900);
    assert_eq!(reread.payment.unwrap().amount_gross, 8900);
}

#[tokio::test]
async fn transcripts_grow_append_only_in_creation_order() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    for body in ["first", "second", "third"] {
        world
            .orders
            .add_message(
                order.id,
                CreateMessageRequest {
                    sender_role: SenderRole::Buyer,
                    body: body.to_string(),
                    attachments: vec![],
                },
            )
            .await
            .unwrap();
    }

    let detail = world.orders.get(order.id).await.unwrap();
    let messages = detail.chat.unwrap().messages;
    let bodies: Vec<&str> = messages.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second", "third"]);
    assert!(messages
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
}

#[tokio::test]
async fn approval_provisions_all_four_records() {
    let world = world().await;
    let candidate = world.store.seed_user("candidate", UserRole::Buyer).await;

    let application = world
        .designers
        .submit(SubmitApplicationRequest {
            user_id: candidate.id,
            bio: "Illustrator with a decade of shipped covers".to_string(),
            skills: vec!["Illustration".to_string()],
            portfolio_links: vec!["https://example.com/portfolio".to_string()],
            portfolio_files: vec![],
            rate_notes: Some("From 5000 per piece".to_string()),
        })
        .await
        .unwrap();

    let approved = world.designers.approve(application.id).await.unwrap();

    assert_eq!(approved.status, ApplicationStatus::Approved);
    assert!(world.store.get_profile(candidate.id).await.unwrap().is_some());
    assert_eq!(
        world.store.get_user(candidate.id).await.unwrap().unwrap().role,
        UserRole::Designer
    );
    let balance = world.store.get_balance(candidate.id).await.unwrap().unwrap();
    assert_eq!((balance.pending, balance.available), (0, 0));
}

#[tokio::test]
async fn overview_tracks_the_lifecycle() {
    let world = world().await;
    let order = world.orders.create(order_request(&world)).await.unwrap();

    let before = world.admin.overview().await.unwrap();
    assert_eq!(before.orders_in_progress, 0);
    assert_eq!(before.total_revenue, 0);

    world.orders.update_status(order.id, "in_work").await.unwrap();
    world
        .orders
        .update_status(order.id, "awaiting_admin_confirm")
        .await
        .unwrap();

    let after = world.admin.overview().await.unwrap();
    assert_eq!(after.orders_in_progress, 1);
    assert_eq!(after.total_revenue, 8900);
    assert!(after.generated_at >= before.generated_at);
}
