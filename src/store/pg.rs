//! PostgreSQL-backed [`Store`] implementation.
//!
//! Multi-step operations run inside a single `sqlx` transaction. Queries
//! are runtime-checked (`sqlx::query_as` with binds); dynamic list filters
//! are assembled with `QueryBuilder` from present fields only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::schema::types::{ApplicationStatus, OrderStatus, PaymentStatus, UserRole};
use crate::error::Result;
use crate::models::admin::AdminCounts;
use crate::models::catalog::{
    Category, CreateServiceRequest, Service, ServiceFilter, ServiceSort, ServiceSummary,
    UpdateServiceRequest,
};
use crate::models::designer::{DesignerApplication, DesignerProfile, SubmitApplicationRequest};
use crate::models::order::{
    Brief, ChatTranscript, Message, Order, OrderFilter, OrderResponse,
};
use crate::models::payment::{DesignerBalance, Payment};
use crate::models::user::{User, UserRef};

use super::{NewMessage, NewOrder, Store};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Order row as stored; `brief` is JSONB.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    service_id: Uuid,
    buyer_id: Uuid,
    designer_id: Option<Uuid>,
    status: OrderStatus,
    brief: Json<Brief>,
    attachments: Vec<String>,
    total_price: i64,
    escrow_payment_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            service_id: row.service_id,
            buyer_id: row.buyer_id,
            designer_id: row.designer_id,
            status: row.status,
            brief: row.brief.0,
            attachments: row.attachments,
            total_price: row.total_price,
            escrow_payment_id: row.escrow_payment_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Flat row for the hydrated order listing: order columns joined with the
/// service summary, party aliases and the (optional) payment.
#[derive(Debug, FromRow)]
struct HydratedOrderRow {
    id: Uuid,
    service_id: Uuid,
    buyer_id: Uuid,
    designer_id: Option<Uuid>,
    status: OrderStatus,
    brief: Json<Brief>,
    attachments: Vec<String>,
    total_price: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    service_title: String,
    service_cover_url: Option<String>,
    service_platform: Option<String>,
    service_format: Option<String>,
    buyer_alias: String,
    designer_alias: Option<String>,
    payment_id: Option<Uuid>,
    payment_gross: Option<i64>,
    payment_net: Option<i64>,
    payment_fee: Option<i64>,
    payment_status: Option<PaymentStatus>,
    payment_provider: Option<String>,
    payment_payload: Option<serde_json::Value>,
    payment_created_at: Option<DateTime<Utc>>,
    payment_updated_at: Option<DateTime<Utc>>,
}

impl HydratedOrderRow {
    fn into_response(self, chat: Option<ChatTranscript>) -> OrderResponse {
        let payment = self.payment_id.map(|payment_id| Payment {
            id: payment_id,
            order_id: self.id,
            amount_gross: self.payment_gross.unwrap_or_default(),
            amount_net: self.payment_net.unwrap_or_default(),
            platform_fee: self.payment_fee.unwrap_or_default(),
            status: self.payment_status.unwrap_or(PaymentStatus::Hold),
            provider: self.payment_provider.unwrap_or_default(),
            payload: self.payment_payload.unwrap_or(serde_json::Value::Null),
            created_at: self.payment_created_at.unwrap_or(self.created_at),
            updated_at: self.payment_updated_at.unwrap_or(self.updated_at),
        });

        OrderResponse {
            id: self.id,
            status: self.status,
            service_id: self.service_id,
            service: Some(ServiceSummary {
                id: self.service_id,
                title: self.service_title,
                cover_url: self.service_cover_url,
                platform: self.service_platform,
                format: self.service_format,
            }),
            buyer: Some(UserRef {
                id: self.buyer_id,
                display_alias: self.buyer_alias,
            }),
            designer: match (self.designer_id, self.designer_alias) {
                (Some(id), Some(display_alias)) => Some(UserRef { id, display_alias }),
                _ => None,
            },
            brief: self.brief.0,
            attachments: self.attachments,
            total_price: self.total_price,
            payment,
            chat,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const HYDRATED_ORDER_SELECT: &str = r#"
    SELECT o.id, o.service_id, o.buyer_id, o.designer_id, o.status, o.brief,
           o.attachments, o.total_price, o.created_at, o.updated_at,
           s.title AS service_title, s.cover_url AS service_cover_url,
           s.platform AS service_platform, s.format AS service_format,
           b.display_alias AS buyer_alias,
           d.display_alias AS designer_alias,
           p.id AS payment_id, p.amount_gross AS payment_gross,
           p.amount_net AS payment_net, p.platform_fee AS payment_fee,
           p.status AS payment_status, p.provider AS payment_provider,
           p.payload AS payment_payload, p.created_at AS payment_created_at,
           p.updated_at AS payment_updated_at
    FROM orders o
    JOIN services s ON s.id = o.service_id
    JOIN users b ON b.id = o.buyer_id
    LEFT JOIN users d ON d.id = o.designer_id
    LEFT JOIN payments p ON p.order_id = o.id
"#;

#[derive(Debug, FromRow)]
struct CountsRow {
    active_orders: i64,
    pending_applications: i64,
    requested_payouts: i64,
    captured_gross: i64,
}

#[async_trait]
impl Store for PgStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE is_active ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT s.* FROM services s JOIN categories c ON c.id = s.category_id WHERE 1=1",
        );

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (s.title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR s.description_md ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if let Some(category) = &filter.category {
            qb.push(" AND c.slug = ");
            qb.push_bind(category.clone());
        }
        if let Some(platform) = &filter.platform {
            qb.push(" AND s.platform = ");
            qb.push_bind(platform.clone());
        }
        if let Some(price_from) = filter.price_from {
            qb.push(" AND (s.base_designer_price + s.platform_markup) >= ");
            qb.push_bind(price_from);
        }
        if let Some(price_to) = filter.price_to {
            qb.push(" AND (s.base_designer_price + s.platform_markup) <= ");
            qb.push_bind(price_to);
        }

        qb.push(match filter.sort {
            ServiceSort::Newest => " ORDER BY s.created_at DESC",
            ServiceSort::PriceAsc => " ORDER BY (s.base_designer_price + s.platform_markup) ASC",
            ServiceSort::PriceDesc => " ORDER BY (s.base_designer_price + s.platform_markup) DESC",
        });

        let services = qb.build_query_as::<Service>().fetch_all(&self.pool).await?;
        Ok(services)
    }

    async fn insert_service(&self, req: &CreateServiceRequest) -> Result<Service> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (
                category_id, title, description_md, cover_url, format, platform,
                turnaround, base_designer_price, platform_markup,
                assigned_designer_id, examples, reviews_enabled, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(req.category_id)
        .bind(&req.title)
        .bind(&req.description_md)
        .bind(&req.cover_url)
        .bind(&req.format)
        .bind(&req.platform)
        .bind(&req.turnaround)
        .bind(req.base_designer_price)
        .bind(req.platform_markup)
        .bind(req.assigned_designer_id)
        .bind(&req.examples)
        .bind(req.reviews_enabled)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(service)
    }

    async fn update_service(
        &self,
        id: Uuid,
        patch: &UpdateServiceRequest,
    ) -> Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description_md = COALESCE($4, description_md),
                cover_url = COALESCE($5, cover_url),
                format = COALESCE($6, format),
                platform = COALESCE($7, platform),
                turnaround = COALESCE($8, turnaround),
                base_designer_price = COALESCE($9, base_designer_price),
                platform_markup = COALESCE($10, platform_markup),
                assigned_designer_id = COALESCE($11, assigned_designer_id),
                examples = COALESCE($12, examples),
                reviews_enabled = COALESCE($13, reviews_enabled),
                is_active = COALESCE($14, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.category_id)
        .bind(&patch.title)
        .bind(&patch.description_md)
        .bind(&patch.cover_url)
        .bind(&patch.format)
        .bind(&patch.platform)
        .bind(&patch.turnaround)
        .bind(patch.base_designer_price)
        .bind(patch.platform_markup)
        .bind(patch.assigned_designer_id)
        .bind(&patch.examples)
        .bind(patch.reviews_enabled)
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(service)
    }

    async fn create_order(&self, new: NewOrder) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                service_id, buyer_id, designer_id, status, brief, attachments, total_price
            ) VALUES ($1, $2, $3, 'new', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.service_id)
        .bind(new.buyer_id)
        .bind(new.designer_id)
        .bind(Json(new.brief.clone()))
        .bind(&new.attachments)
        .bind(new.total_price)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO chats (order_id) VALUES ($1)")
            .bind(order_row.id)
            .execute(&mut *tx)
            .await?;

        let net = new.total_price - new.platform_fee;
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (order_id, amount_gross, amount_net, platform_fee)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order_row.id)
        .bind(new.total_price)
        .bind(net)
        .bind(new.platform_fee)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE orders SET escrow_payment_id = $1 WHERE id = $2")
            .bind(payment.id)
            .bind(order_row.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut order: Order = order_row.into();
        order.escrow_payment_id = Some(payment.id);
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order.map(Order::from))
    }

    async fn get_order_detail(&self, id: Uuid) -> Result<Option<OrderResponse>> {
        let mut qb = QueryBuilder::<Postgres>::new(HYDRATED_ORDER_SELECT);
        qb.push(" WHERE o.id = ");
        qb.push_bind(id);

        let Some(row) = qb
            .build_query_as::<HydratedOrderRow>()
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let chat_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM chats WHERE order_id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let chat = match chat_id {
            Some(chat_id) => {
                let messages = sqlx::query_as::<_, Message>(
                    "SELECT * FROM messages WHERE chat_id = $1 ORDER BY created_at ASC",
                )
                .bind(chat_id)
                .fetch_all(&self.pool)
                .await?;
                Some(ChatTranscript {
                    id: chat_id,
                    messages,
                })
            }
            None => None,
        };

        Ok(Some(row.into_response(chat)))
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<OrderResponse>> {
        let mut qb = QueryBuilder::<Postgres>::new(HYDRATED_ORDER_SELECT);
        qb.push(" WHERE 1=1");

        if let Some(status) = filter.status {
            qb.push(" AND o.status = ");
            qb.push_bind(status);
        }
        if let Some(buyer_id) = filter.buyer_id {
            qb.push(" AND o.buyer_id = ");
            qb.push_bind(buyer_id);
        }
        if let Some(designer_id) = filter.designer_id {
            qb.push(" AND o.designer_id = ");
            qb.push_bind(designer_id);
        }
        qb.push(" ORDER BY o.created_at DESC");

        let rows = qb
            .build_query_as::<HydratedOrderRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.into_response(None)).collect())
    }

    async fn set_order_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, OrderRow>(
            "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order.map(Order::from))
    }

    async fn append_message(&self, order_id: Uuid, message: NewMessage) -> Result<Message> {
        let mut tx = self.pool.begin().await?;

        let chat_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM chats WHERE order_id = $1")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;

        let chat_id = match chat_id {
            Some(id) => id,
            None => {
                sqlx::query_scalar("INSERT INTO chats (order_id) VALUES ($1) RETURNING id")
                    .bind(order_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (chat_id, sender_role, body, attachments)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(chat_id)
        .bind(message.sender_role)
        .bind(&message.body)
        .bind(&message.attachments)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payment)
    }

    async fn get_payment_for_order(&self, order_id: Uuid) -> Result<Option<Payment>> {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(payment)
    }

    async fn upsert_hold(
        &self,
        order_id: Uuid,
        amount_gross: i64,
        platform_fee: i64,
    ) -> Result<Payment> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (order_id, amount_gross, amount_net, platform_fee)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (order_id) DO UPDATE SET
                amount_gross = EXCLUDED.amount_gross,
                amount_net = EXCLUDED.amount_net,
                platform_fee = EXCLUDED.platform_fee,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(amount_gross)
        .bind(amount_gross - platform_fee)
        .bind(platform_fee)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE orders SET escrow_payment_id = $1 WHERE id = $2")
            .bind(payment.id)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(payment)
    }

    async fn capture_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let mut tx = self.pool.begin().await?;

        // Guarded transition: only a payment still in hold moves to
        // captured, so a raced or repeated capture can never credit twice.
        let captured = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET status = 'captured', updated_at = now()
            WHERE id = $1 AND status = 'hold'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(payment) = captured else {
            tx.commit().await?;
            return self.get_payment(id).await;
        };

        let designer_id: Option<Uuid> =
            sqlx::query_scalar("SELECT designer_id FROM orders WHERE id = $1")
                .bind(payment.order_id)
                .fetch_one(&mut *tx)
                .await?;

        if let Some(designer_id) = designer_id {
            sqlx::query(
                r#"
                INSERT INTO designer_balances (designer_id, pending)
                VALUES ($1, $2)
                ON CONFLICT (designer_id) DO UPDATE SET
                    pending = designer_balances.pending + EXCLUDED.pending,
                    updated_at = now()
                "#,
            )
            .bind(designer_id)
            .bind(payment.amount_net)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(payment))
    }

    async fn refund_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let refunded = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET status = 'refunded', updated_at = now()
            WHERE id = $1 AND status = 'hold'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match refunded {
            Some(payment) => Ok(Some(payment)),
            None => self.get_payment(id).await,
        }
    }

    async fn get_balance(&self, designer_id: Uuid) -> Result<Option<DesignerBalance>> {
        let balance = sqlx::query_as::<_, DesignerBalance>(
            "SELECT * FROM designer_balances WHERE designer_id = $1",
        )
        .bind(designer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(balance)
    }

    async fn insert_application(
        &self,
        req: &SubmitApplicationRequest,
    ) -> Result<DesignerApplication> {
        let application = sqlx::query_as::<_, DesignerApplication>(
            r#"
            INSERT INTO designer_applications (
                user_id, bio, skills, portfolio_links, portfolio_files, rate_notes
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.bio)
        .bind(&req.skills)
        .bind(&req.portfolio_links)
        .bind(&req.portfolio_files)
        .bind(&req.rate_notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<DesignerApplication>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT * FROM designer_applications WHERE 1=1",
        );
        if let Some(status) = status {
            qb.push(" AND status = ");
            qb.push_bind(status);
        }
        qb.push(" ORDER BY created_at DESC");

        let applications = qb
            .build_query_as::<DesignerApplication>()
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<DesignerApplication>> {
        let application = sqlx::query_as::<_, DesignerApplication>(
            "SELECT * FROM designer_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn approve_application(&self, id: Uuid) -> Result<Option<DesignerApplication>> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, DesignerApplication>(
            r#"
            UPDATE designer_applications SET status = 'approved', updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(application) = application else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO designer_profiles (user_id, bio, skills, portfolio_links, portfolio_files)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                bio = EXCLUDED.bio,
                skills = EXCLUDED.skills,
                portfolio_links = EXCLUDED.portfolio_links,
                portfolio_files = EXCLUDED.portfolio_files,
                updated_at = now()
            "#,
        )
        .bind(application.user_id)
        .bind(&application.bio)
        .bind(&application.skills)
        .bind(&application.portfolio_links)
        .bind(&application.portfolio_files)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(application.user_id)
            .bind(UserRole::Designer)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO designer_balances (designer_id) VALUES ($1) ON CONFLICT DO NOTHING",
        )
        .bind(application.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(application))
    }

    async fn reject_application(&self, id: Uuid) -> Result<Option<DesignerApplication>> {
        let application = sqlx::query_as::<_, DesignerApplication>(
            r#"
            UPDATE designer_applications SET status = 'rejected', updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<DesignerProfile>> {
        let profile = sqlx::query_as::<_, DesignerProfile>(
            "SELECT * FROM designer_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn admin_counts(&self) -> Result<AdminCounts> {
        let row = sqlx::query_as::<_, CountsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM orders
                 WHERE status IN ('in_work', 'on_review', 'revision', 'awaiting_admin_confirm'))
                    AS active_orders,
                (SELECT COUNT(*) FROM designer_applications WHERE status = 'pending')
                    AS pending_applications,
                (SELECT COUNT(*) FROM payout_requests WHERE status = 'requested')
                    AS requested_payouts,
                (SELECT COALESCE(SUM(amount_gross), 0)::BIGINT FROM payments
                 WHERE status = 'captured')
                    AS captured_gross
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AdminCounts {
            active_orders: row.active_orders,
            pending_applications: row.pending_applications,
            requested_payouts: row.requested_payouts,
            captured_gross: row.captured_gross,
        })
    }
}
