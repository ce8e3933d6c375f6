use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::schema::types::PaymentStatus;
use crate::error::{ApiError, Result};
use crate::models::payment::Payment;
use crate::store::Store;

/// Escrow ledger operations: hold, capture, refund.
///
/// Amounts are whole currency units. The platform fee is snapshotted onto
/// the payment at hold creation from the service's markup and never
/// recomputed afterwards.
#[derive(Clone)]
pub struct EscrowService {
    store: Arc<dyn Store>,
}

impl EscrowService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Open (or refresh) the escrow hold for an order. Keyed by the unique
    /// order reference, so retrying is safe: the existing record is
    /// updated rather than duplicated.
    pub async fn create_hold(&self, order_id: Uuid, amount: i64) -> Result<Payment> {
        let order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))?;

        let service = self
            .store
            .get_service(order.service_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Service"))?;

        let payment = self
            .store
            .upsert_hold(order_id, amount, service.platform_markup)
            .await?;

        info!(
            order_id = %order_id,
            payment_id = %payment.id,
            amount_gross = payment.amount_gross,
            platform_fee = payment.platform_fee,
            "Escrow hold opened"
        );
        Ok(payment)
    }

    /// Capture a held payment, crediting the designer's pending balance by
    /// the net amount. Idempotent: capturing an already-captured payment
    /// returns the existing record unchanged and credits nothing, so a
    /// repeated admin click or retried request cannot double-pay.
    pub async fn capture(&self, payment_id: Uuid) -> Result<Payment> {
        let payment = self
            .store
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Payment"))?;

        if payment.status == PaymentStatus::Captured {
            info!(payment_id = %payment_id, "Capture requested on already-captured payment");
            return Ok(payment);
        }

        let captured = self
            .store
            .capture_payment(payment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Payment"))?;

        info!(
            payment_id = %payment_id,
            amount_net = captured.amount_net,
            "Escrow captured"
        );
        Ok(captured)
    }

    /// Refund a held payment back to the buyer.
    pub async fn refund(&self, payment_id: Uuid) -> Result<Payment> {
        let refunded = self
            .store
            .refund_payment(payment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Payment"))?;

        info!(payment_id = %payment_id, "Escrow refunded");
        Ok(refunded)
    }
}
