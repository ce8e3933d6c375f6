//! In-memory [`Store`] backend.
//!
//! Used by the test suites (a fresh instance per test) and as a database-free
//! backend for local experiments. State lives behind one async mutex, so
//! every trait method is atomic by construction, mirroring the transaction
//! boundaries of [`super::PgStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::database::schema::types::{
    ApplicationStatus, OrderStatus, PaymentStatus, PayoutStatus, UserRole,
};
use crate::error::Result;
use crate::models::admin::AdminCounts;
use crate::models::catalog::{
    Category, CreateServiceRequest, Service, ServiceFilter, ServiceSort, ServiceSummary,
    UpdateServiceRequest,
};
use crate::models::designer::{DesignerApplication, DesignerProfile, SubmitApplicationRequest};
use crate::models::order::{ChatTranscript, Message, Order, OrderFilter, OrderResponse};
use crate::models::payment::{DesignerBalance, Payment};
use crate::models::user::{User, UserRef};

use super::{NewMessage, NewOrder, Store};

// Payout fulfillment happens outside this service; only the requested
// count is read here.
#[allow(dead_code)]
#[derive(Debug, Clone)]
struct PayoutRequest {
    designer_id: Uuid,
    amount: i64,
    status: PayoutStatus,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    categories: Vec<Category>,
    services: HashMap<Uuid, Service>,
    orders: HashMap<Uuid, Order>,
    /// order_id -> chat_id
    chats: HashMap<Uuid, Uuid>,
    /// chat_id -> transcript, in append order
    messages: HashMap<Uuid, Vec<Message>>,
    payments: HashMap<Uuid, Payment>,
    applications: HashMap<Uuid, DesignerApplication>,
    profiles: HashMap<Uuid, DesignerProfile>,
    balances: HashMap<Uuid, DesignerBalance>,
    payouts: Vec<PayoutRequest>,
}

impl Inner {
    fn hydrate(&self, order: &Order, chat: Option<ChatTranscript>) -> OrderResponse {
        let service = self.services.get(&order.service_id).map(ServiceSummary::from);
        let buyer = self.users.get(&order.buyer_id).map(|user| UserRef {
            id: user.id,
            display_alias: user.display_alias.clone(),
        });
        let designer = order
            .designer_id
            .and_then(|id| self.users.get(&id))
            .map(|user| UserRef {
                id: user.id,
                display_alias: user.display_alias.clone(),
            });
        let payment = self
            .payments
            .values()
            .find(|payment| payment.order_id == order.id)
            .cloned();

        OrderResponse {
            id: order.id,
            status: order.status,
            service_id: order.service_id,
            service,
            buyer,
            designer,
            brief: order.brief.clone(),
            attachments: order.attachments.clone(),
            total_price: order.total_price,
            payment,
            chat,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }

    fn transcript(&self, order_id: Uuid) -> Option<ChatTranscript> {
        let chat_id = *self.chats.get(&order_id)?;
        Some(ChatTranscript {
            id: chat_id,
            messages: self.messages.get(&chat_id).cloned().unwrap_or_default(),
        })
    }

    fn credit_pending(&mut self, designer_id: Uuid, amount: i64) {
        let balance = self
            .balances
            .entry(designer_id)
            .or_insert_with(|| DesignerBalance {
                designer_id,
                pending: 0,
                available: 0,
                updated_at: Utc::now(),
            });
        balance.pending += amount;
        balance.updated_at = Utc::now();
    }
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    pub async fn seed_user(&self, display_alias: &str, role: UserRole) -> User {
        let user = User {
            id: Uuid::new_v4(),
            display_alias: display_alias.to_string(),
            role,
            created_at: Utc::now(),
        };
        self.inner.lock().await.users.insert(user.id, user.clone());
        user
    }

    pub async fn seed_category(&self, name: &str, slug: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            sort_order: 0,
            is_active: true,
        };
        self.inner.lock().await.categories.push(category.clone());
        category
    }

    pub async fn seed_payout_request(&self, designer_id: Uuid, amount: i64) {
        self.inner.lock().await.payouts.push(PayoutRequest {
            designer_id,
            amount,
            status: PayoutStatus::Requested,
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.lock().await.users.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let inner = self.inner.lock().await;
        let mut categories: Vec<Category> = inner
            .categories
            .iter()
            .filter(|category| category.is_active)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Service>> {
        Ok(self.inner.lock().await.services.get(&id).cloned())
    }

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>> {
        let inner = self.inner.lock().await;

        let category_id = filter.category.as_ref().and_then(|slug| {
            inner
                .categories
                .iter()
                .find(|category| &category.slug == slug)
                .map(|category| category.id)
        });

        let mut services: Vec<Service> = inner
            .services
            .values()
            .filter(|service| {
                if let Some(search) = &filter.search {
                    let needle = search.to_lowercase();
                    if !service.title.to_lowercase().contains(&needle)
                        && !service.description_md.to_lowercase().contains(&needle)
                    {
                        return false;
                    }
                }
                if filter.category.is_some() && Some(service.category_id) != category_id {
                    return false;
                }
                if let Some(platform) = &filter.platform {
                    if service.platform.as_deref() != Some(platform.as_str()) {
                        return false;
                    }
                }
                if let Some(price_from) = filter.price_from {
                    if service.total_price() < price_from {
                        return false;
                    }
                }
                if let Some(price_to) = filter.price_to {
                    if service.total_price() > price_to {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        match filter.sort {
            ServiceSort::Newest => services.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ServiceSort::PriceAsc => services.sort_by_key(|service| service.total_price()),
            ServiceSort::PriceDesc => {
                services.sort_by_key(|service| std::cmp::Reverse(service.total_price()))
            }
        }

        Ok(services)
    }

    async fn insert_service(&self, req: &CreateServiceRequest) -> Result<Service> {
        let now = Utc::now();
        let service = Service {
            id: Uuid::new_v4(),
            category_id: req.category_id,
            title: req.title.clone(),
            description_md: req.description_md.clone(),
            cover_url: req.cover_url.clone(),
            format: req.format.clone(),
            platform: req.platform.clone(),
            turnaround: req.turnaround.clone(),
            base_designer_price: req.base_designer_price,
            platform_markup: req.platform_markup,
            assigned_designer_id: req.assigned_designer_id,
            is_active: req.is_active,
            examples: req.examples.clone(),
            reviews_enabled: req.reviews_enabled,
            created_at: now,
            updated_at: now,
        };
        self.inner
            .lock()
            .await
            .services
            .insert(service.id, service.clone());
        Ok(service)
    }

    async fn update_service(
        &self,
        id: Uuid,
        patch: &UpdateServiceRequest,
    ) -> Result<Option<Service>> {
        let mut inner = self.inner.lock().await;
        let Some(service) = inner.services.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(category_id) = patch.category_id {
            service.category_id = category_id;
        }
        if let Some(title) = &patch.title {
            service.title = title.clone();
        }
        if let Some(description_md) = &patch.description_md {
            service.description_md = description_md.clone();
        }
        if let Some(cover_url) = &patch.cover_url {
            service.cover_url = Some(cover_url.clone());
        }
        if let Some(format) = &patch.format {
            service.format = Some(format.clone());
        }
        if let Some(platform) = &patch.platform {
            service.platform = Some(platform.clone());
        }
        if let Some(turnaround) = &patch.turnaround {
            service.turnaround = Some(turnaround.clone());
        }
        if let Some(base_designer_price) = patch.base_designer_price {
            service.base_designer_price = base_designer_price;
        }
        if let Some(platform_markup) = patch.platform_markup {
            service.platform_markup = platform_markup;
        }
        if let Some(assigned_designer_id) = patch.assigned_designer_id {
            service.assigned_designer_id = Some(assigned_designer_id);
        }
        if let Some(examples) = &patch.examples {
            service.examples = examples.clone();
        }
        if let Some(reviews_enabled) = patch.reviews_enabled {
            service.reviews_enabled = reviews_enabled;
        }
        if let Some(is_active) = patch.is_active {
            service.is_active = is_active;
        }
        service.updated_at = Utc::now();

        Ok(Some(service.clone()))
    }

    async fn create_order(&self, new: NewOrder) -> Result<Order> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();

        let order_id = Uuid::new_v4();
        let chat_id = Uuid::new_v4();
        let payment_id = Uuid::new_v4();

        let payment = Payment {
            id: payment_id,
            order_id,
            amount_gross: new.total_price,
            amount_net: new.total_price - new.platform_fee,
            platform_fee: new.platform_fee,
            status: PaymentStatus::Hold,
            provider: "mock".to_string(),
            payload: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        };

        let order = Order {
            id: order_id,
            service_id: new.service_id,
            buyer_id: new.buyer_id,
            designer_id: new.designer_id,
            status: OrderStatus::New,
            brief: new.brief,
            attachments: new.attachments,
            total_price: new.total_price,
            escrow_payment_id: Some(payment_id),
            created_at: now,
            updated_at: now,
        };

        inner.orders.insert(order_id, order.clone());
        inner.chats.insert(order_id, chat_id);
        inner.messages.insert(chat_id, Vec::new());
        inner.payments.insert(payment_id, payment);

        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.inner.lock().await.orders.get(&id).cloned())
    }

    async fn get_order_detail(&self, id: Uuid) -> Result<Option<OrderResponse>> {
        let inner = self.inner.lock().await;
        let Some(order) = inner.orders.get(&id) else {
            return Ok(None);
        };
        let chat = inner.transcript(id);
        Ok(Some(inner.hydrate(order, chat)))
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<OrderResponse>> {
        let inner = self.inner.lock().await;
        let mut orders: Vec<&Order> = inner
            .orders
            .values()
            .filter(|order| filter.matches(order))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders
            .into_iter()
            .map(|order| inner.hydrate(order, None))
            .collect())
    }

    async fn set_order_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let mut inner = self.inner.lock().await;
        let Some(order) = inner.orders.get_mut(&id) else {
            return Ok(None);
        };
        order.status = status;
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }

    async fn append_message(&self, order_id: Uuid, message: NewMessage) -> Result<Message> {
        let mut inner = self.inner.lock().await;
        let chat_id = match inner.chats.get(&order_id) {
            Some(chat_id) => *chat_id,
            None => {
                let chat_id = Uuid::new_v4();
                inner.chats.insert(order_id, chat_id);
                chat_id
            }
        };

        let message = Message {
            id: Uuid::new_v4(),
            chat_id,
            sender_role: message.sender_role,
            body: message.body,
            attachments: message.attachments,
            created_at: Utc::now(),
        };
        inner
            .messages
            .entry(chat_id)
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        Ok(self.inner.lock().await.payments.get(&id).cloned())
    }

    async fn get_payment_for_order(&self, order_id: Uuid) -> Result<Option<Payment>> {
        Ok(self
            .inner
            .lock()
            .await
            .payments
            .values()
            .find(|payment| payment.order_id == order_id)
            .cloned())
    }

    async fn upsert_hold(
        &self,
        order_id: Uuid,
        amount_gross: i64,
        platform_fee: i64,
    ) -> Result<Payment> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();

        let existing_id = inner
            .payments
            .values()
            .find(|payment| payment.order_id == order_id)
            .map(|payment| payment.id);

        let payment = match existing_id.and_then(|id| inner.payments.remove(&id)) {
            Some(mut payment) => {
                payment.amount_gross = amount_gross;
                payment.amount_net = amount_gross - platform_fee;
                payment.platform_fee = platform_fee;
                payment.updated_at = now;
                inner.payments.insert(payment.id, payment.clone());
                payment
            }
            None => {
                let payment = Payment {
                    id: Uuid::new_v4(),
                    order_id,
                    amount_gross,
                    amount_net: amount_gross - platform_fee,
                    platform_fee,
                    status: PaymentStatus::Hold,
                    provider: "mock".to_string(),
                    payload: serde_json::json!({}),
                    created_at: now,
                    updated_at: now,
                };
                inner.payments.insert(payment.id, payment.clone());
                payment
            }
        };

        if let Some(order) = inner.orders.get_mut(&order_id) {
            order.escrow_payment_id = Some(payment.id);
            order.updated_at = now;
        }

        Ok(payment)
    }

    async fn capture_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let mut inner = self.inner.lock().await;
        let Some(mut payment) = inner.payments.get(&id).cloned() else {
            return Ok(None);
        };
        if payment.status != PaymentStatus::Hold {
            return Ok(Some(payment));
        }

        payment.status = PaymentStatus::Captured;
        payment.updated_at = Utc::now();
        inner.payments.insert(id, payment.clone());

        let designer_id = inner
            .orders
            .get(&payment.order_id)
            .and_then(|order| order.designer_id);
        if let Some(designer_id) = designer_id {
            inner.credit_pending(designer_id, payment.amount_net);
        }

        Ok(Some(payment))
    }

    async fn refund_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let mut inner = self.inner.lock().await;
        let Some(payment) = inner.payments.get_mut(&id) else {
            return Ok(None);
        };
        if payment.status == PaymentStatus::Hold {
            payment.status = PaymentStatus::Refunded;
            payment.updated_at = Utc::now();
        }
        Ok(Some(payment.clone()))
    }

    async fn get_balance(&self, designer_id: Uuid) -> Result<Option<DesignerBalance>> {
        Ok(self.inner.lock().await.balances.get(&designer_id).cloned())
    }

    async fn insert_application(
        &self,
        req: &SubmitApplicationRequest,
    ) -> Result<DesignerApplication> {
        let now = Utc::now();
        let application = DesignerApplication {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            status: ApplicationStatus::Pending,
            bio: req.bio.clone(),
            skills: req.skills.clone(),
            portfolio_links: req.portfolio_links.clone(),
            portfolio_files: req.portfolio_files.clone(),
            rate_notes: req.rate_notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inner
            .lock()
            .await
            .applications
            .insert(application.id, application.clone());
        Ok(application)
    }

    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<DesignerApplication>> {
        let inner = self.inner.lock().await;
        let mut applications: Vec<DesignerApplication> = inner
            .applications
            .values()
            .filter(|application| status.is_none() || status == Some(application.status))
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<DesignerApplication>> {
        Ok(self.inner.lock().await.applications.get(&id).cloned())
    }

    async fn approve_application(&self, id: Uuid) -> Result<Option<DesignerApplication>> {
        let mut inner = self.inner.lock().await;
        let Some(application) = inner.applications.get_mut(&id) else {
            return Ok(None);
        };

        application.status = ApplicationStatus::Approved;
        application.updated_at = Utc::now();
        let application = application.clone();

        let now = Utc::now();
        inner
            .profiles
            .entry(application.user_id)
            .and_modify(|profile| {
                profile.bio = application.bio.clone();
                profile.skills = application.skills.clone();
                profile.portfolio_links = application.portfolio_links.clone();
                profile.portfolio_files = application.portfolio_files.clone();
                profile.updated_at = now;
            })
            .or_insert_with(|| DesignerProfile {
                user_id: application.user_id,
                bio: application.bio.clone(),
                skills: application.skills.clone(),
                portfolio_links: application.portfolio_links.clone(),
                portfolio_files: application.portfolio_files.clone(),
                created_at: now,
                updated_at: now,
            });

        if let Some(user) = inner.users.get_mut(&application.user_id) {
            user.role = UserRole::Designer;
        }

        let user_id = application.user_id;
        inner
            .balances
            .entry(user_id)
            .or_insert_with(|| DesignerBalance {
                designer_id: user_id,
                pending: 0,
                available: 0,
                updated_at: now,
            });

        Ok(Some(application))
    }

    async fn reject_application(&self, id: Uuid) -> Result<Option<DesignerApplication>> {
        let mut inner = self.inner.lock().await;
        let Some(application) = inner.applications.get_mut(&id) else {
            return Ok(None);
        };
        application.status = ApplicationStatus::Rejected;
        application.updated_at = Utc::now();
        Ok(Some(application.clone()))
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<DesignerProfile>> {
        Ok(self.inner.lock().await.profiles.get(&user_id).cloned())
    }

    async fn admin_counts(&self) -> Result<AdminCounts> {
        let inner = self.inner.lock().await;
        Ok(AdminCounts {
            active_orders: inner
                .orders
                .values()
                .filter(|order| OrderStatus::ACTIVE.contains(&order.status))
                .count() as i64,
            pending_applications: inner
                .applications
                .values()
                .filter(|application| application.status == ApplicationStatus::Pending)
                .count() as i64,
            requested_payouts: inner
                .payouts
                .iter()
                .filter(|payout| payout.status == PayoutStatus::Requested)
                .count() as i64,
            captured_gross: inner
                .payments
                .values()
                .filter(|payment| payment.status == PaymentStatus::Captured)
                .map(|payment| payment.amount_gross)
                .sum(),
        })
    }
}
