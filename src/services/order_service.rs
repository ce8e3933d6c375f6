use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::OrderStatus;
use crate::error::{ApiError, Result};
use crate::models::order::{
    CreateMessageRequest, CreateOrderRequest, ListOrdersQuery, Message, OrderFilter,
    OrderResponse,
};
use crate::services::chat_hub::{ChatEvent, ChatHub};
use crate::services::escrow_service::EscrowService;
use crate::store::{NewMessage, NewOrder, Store};

/// Order lifecycle: creation (order + chat + escrow hold in one
/// transaction), listing, status transitions with their escrow side
/// effects, and chat message submission.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn Store>,
    escrow: EscrowService,
    chat_hub: ChatHub,
}

impl OrderService {
    pub fn new(store: Arc<dyn Store>, escrow: EscrowService, chat_hub: ChatHub) -> Self {
        Self {
            store,
            escrow,
            chat_hub,
        }
    }

    /// Place an order. A half-created order (no chat, or no payment) has
    /// no valid meaning in this domain, so the three records are created
    /// together or not at all.
    pub async fn create(&self, req: CreateOrderRequest) -> Result<OrderResponse> {
        req.validate()?;

        let service = self
            .store
            .get_service(req.service_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Service"))?;

        let total_price = service.total_price();
        let designer_id = req.designer_id.or(service.assigned_designer_id);

        let order = self
            .store
            .create_order(NewOrder {
                service_id: req.service_id,
                buyer_id: req.buyer_id,
                designer_id,
                brief: req.brief,
                attachments: req.attachments,
                total_price,
                platform_fee: service.platform_markup,
            })
            .await?;

        info!(
            order_id = %order.id,
            buyer_id = %order.buyer_id,
            total_price,
            "Order created with chat and escrow hold"
        );

        self.store
            .get_order_detail(order.id)
            .await?
            .ok_or_else(|| ApiError::Internal("Order missing right after creation".to_string()))
    }

    pub async fn list(&self, query: ListOrdersQuery) -> Result<Vec<OrderResponse>> {
        let mut filter = OrderFilter::for_viewer(query.role.as_deref(), query.user_id);
        if let Some(raw) = &query.status {
            let status: OrderStatus =
                raw.parse().map_err(|_| ApiError::unknown_status(raw))?;
            filter = filter.with_status(status);
        }
        self.store.list_orders(&filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<OrderResponse> {
        self.store
            .get_order_detail(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))
    }

    /// Apply a status transition. The status string is checked against the
    /// closed enumeration; transitions themselves are not gated. Entering
    /// `awaiting_admin_confirm` captures the order's escrow payment;
    /// entering `cancelled` refunds it.
    pub async fn update_status(&self, id: Uuid, raw_status: &str) -> Result<OrderResponse> {
        let status: OrderStatus = raw_status
            .parse()
            .map_err(|_| ApiError::unknown_status(raw_status))?;

        let order = self
            .store
            .set_order_status(id, status)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))?;

        info!(order_id = %id, status = %status, "Order status updated");

        if let Some(payment_id) = order.escrow_payment_id {
            match status {
                OrderStatus::AwaitingAdminConfirm => {
                    self.escrow.capture(payment_id).await?;
                }
                OrderStatus::Cancelled => {
                    self.escrow.refund(payment_id).await?;
                }
                _ => {}
            }
        }

        self.store
            .get_order_detail(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))
    }

    /// Append a chat message. Persistence is transactional and must
    /// succeed; the live broadcast that follows is best-effort and its
    /// outcome never affects the response.
    pub async fn add_message(&self, order_id: Uuid, req: CreateMessageRequest) -> Result<Message> {
        req.validate()?;

        self.store
            .get_order(order_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))?;

        let message = self
            .store
            .append_message(
                order_id,
                NewMessage {
                    sender_role: req.sender_role,
                    body: req.body,
                    attachments: req.attachments,
                },
            )
            .await?;

        let delivered = self
            .chat_hub
            .publish(
                order_id,
                ChatEvent::MessageCreated {
                    order_id,
                    message: message.clone(),
                },
            )
            .await;
        debug!(
            order_id = %order_id,
            message_id = %message.id,
            delivered,
            "Chat message stored and published"
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::types::{PaymentStatus, SenderRole, UserRole};
    use crate::models::catalog::{CreateServiceRequest, UpdateServiceRequest};
    use crate::models::order::Brief;
    use crate::store::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        orders: OrderService,
        service_id: Uuid,
        buyer_id: Uuid,
        designer_id: Uuid,
    }

    async fn setup() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let escrow = EscrowService::new(store.clone());
        let orders = OrderService::new(store.clone(), escrow, ChatHub::new());

        let buyer = store.seed_user("buyer", UserRole::Buyer).await;
        let designer = store.seed_user("designer", UserRole::Designer).await;
        let category = store.seed_category("Thumbnails", "thumbnails").await;

        let service = store
            .insert_service(&CreateServiceRequest {
                category_id: category.id,
                title: "YouTube thumbnail".to_string(),
                description_md: "Thumbnail design".to_string(),
                cover_url: None,
                format: Some("1280x720".to_string()),
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

        Fixture {
            store,
            orders,
            service_id: service.id,
            buyer_id: buyer.id,
            designer_id: designer.id,
        }
    }

    fn order_request(fixture: &Fixture) -> CreateOrderRequest {
        CreateOrderRequest {
            service_id: fixture.service_id,
            buyer_id: fixture.buyer_id,
            designer_id: None,
            brief: Brief {
                goal: "Raise CTR".to_string(),
                platform: "YouTube".to_string(),
                format: "1920x1080".to_string(),
                deadline: "48h".to_string(),
                references: vec![],
                notes: Some("Focus on the speaker".to_string()),
            },
            attachments: vec![],
        }
    }

    #[tokio::test]
    async fn create_snapshots_price_and_resolves_the_assigned_designer() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.total_price, 8900);
        assert_eq!(order.designer.as_ref().unwrap().id, fixture.designer_id);

        let chat = order.chat.expect("order owns a chat from birth");
        assert!(chat.messages.is_empty());

        let payment = order.payment.expect("order owns an escrow hold from birth");
        assert_eq!(payment.status, PaymentStatus::Hold);
        assert_eq!(payment.amount_gross, 8900);
        assert_eq!(payment.amount_net, 7000);
    }

    #[tokio::test]
    async fn create_fails_with_not_found_for_missing_service() {
        let fixture = setup().await;
        let mut req = order_request(&fixture);
        req.service_id = Uuid::new_v4();
        let err = fixture.orders.create(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Service not found");
    }

    #[tokio::test]
    async fn snapshot_survives_later_price_edits() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();
        assert_eq!(order.total_price, 8900);

        fixture
            .store
            .update_service(
                fixture.service_id,
                &UpdateServiceRequest {
                    base_designer_price: Some(20000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let reread = fixture.orders.get(order.id).await.unwrap();
        assert_eq!(reread.total_price, 8900);
    }

    #[tokio::test]
    async fn awaiting_admin_confirm_captures_and_credits() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        let updated = fixture
            .orders
            .update_status(order.id, "awaiting_admin_confirm")
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::AwaitingAdminConfirm);
        assert_eq!(updated.payment.unwrap().status, PaymentStatus::Captured);

        let balance = fixture
            .store
            .get_balance(fixture.designer_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(balance.pending, 7000);
    }

    #[tokio::test]
    async fn repeating_the_confirm_transition_credits_once() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        fixture
            .orders
            .update_status(order.id, "awaiting_admin_confirm")
            .await
            .unwrap();
        fixture
            .orders
            .update_status(order.id, "awaiting_admin_confirm")
            .await
            .unwrap();

        let balance = fixture
            .store
            .get_balance(fixture.designer_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(balance.pending, 7000);
    }

    #[tokio::test]
    async fn cancelling_refunds_the_hold() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        let updated = fixture.orders.update_status(order.id, "cancelled").await.unwrap();

        assert_eq!(updated.status, OrderStatus::Cancelled);
        assert_eq!(updated.payment.unwrap().status, PaymentStatus::Refunded);
    }

    #[tokio::test]
    async fn unknown_status_fails_validation_and_leaves_the_order_unchanged() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        let err = fixture
            .orders
            .update_status(order.id, "not_a_status")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown status"));

        let reread = fixture.orders.get(order.id).await.unwrap();
        assert_eq!(reread.status, OrderStatus::New);
    }

    #[tokio::test]
    async fn list_scopes_by_viewer_role() {
        let fixture = setup().await;
        fixture.orders.create(order_request(&fixture)).await.unwrap();

        let as_buyer = fixture
            .orders
            .list(ListOrdersQuery {
                status: None,
                role: Some("buyer".to_string()),
                user_id: Some(fixture.buyer_id),
            })
            .await
            .unwrap();
        assert_eq!(as_buyer.len(), 1);

        let as_other_buyer = fixture
            .orders
            .list(ListOrdersQuery {
                status: None,
                role: Some("buyer".to_string()),
                user_id: Some(Uuid::new_v4()),
            })
            .await
            .unwrap();
        assert!(as_other_buyer.is_empty());

        let as_designer = fixture
            .orders
            .list(ListOrdersQuery {
                status: None,
                role: Some("designer".to_string()),
                user_id: Some(fixture.designer_id),
            })
            .await
            .unwrap();
        assert_eq!(as_designer.len(), 1);
    }

    #[tokio::test]
    async fn messages_append_in_order_and_reach_subscribers() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        let (_client, mut rx) = fixture.orders.chat_hub.subscribe(order.id).await;

        for (role, body) in [
            (SenderRole::Buyer, "Added references to the brief"),
            (SenderRole::Designer, "First draft in 24h"),
            (SenderRole::Buyer, "Thanks!"),
        ] {
            fixture
                .orders
                .add_message(
                    order.id,
                    CreateMessageRequest {
                        sender_role: role,
                        body: body.to_string(),
                        attachments: vec![],
                    },
                )
                .await
                .unwrap();
        }

        let detail = fixture.orders.get(order.id).await.unwrap();
        let messages = detail.chat.unwrap().messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].body, "Added references to the brief");
        assert_eq!(messages[2].body, "Thanks!");
        assert!(messages
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at));

        // All three events were fanned out live.
        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 3);
    }

    #[tokio::test]
    async fn add_message_rejects_empty_bodies_and_missing_orders() {
        let fixture = setup().await;
        let order = fixture.orders.create(order_request(&fixture)).await.unwrap();

        let err = fixture
            .orders
            .add_message(
                order.id,
                CreateMessageRequest {
                    sender_role: SenderRole::Buyer,
                    body: String::new(),
                    attachments: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationWithField { .. }));

        let err = fixture
            .orders
            .add_message(
                Uuid::new_v4(),
                CreateMessageRequest {
                    sender_role: SenderRole::Buyer,
                    body: "hello".to_string(),
                    attachments: vec![],
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Order not found");
    }
}
