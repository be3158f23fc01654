use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use pizza_catalog::{PricingCalculator, Quote};
use pizza_core::notification::Notifier;
use pizza_core::payment::{PaymentGateway, TransactionSession, TransactionStatus, TransactionVerification};
use pizza_core::repository::OrderRepository;
use pizza_core::{CoreError, CoreResult, Order, OrderDetails, PaidOrder, PaymentStatus};
use pizza_shared::Masked;

use crate::reference::ReferenceGenerator;

/// Where a checkout currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStage {
    Previewed,
    PaymentInitialized,
    PaymentVerified,
    OrderCreated,
    PaymentFailed,
}

/// Checkout fields echoed back with server-side pricing
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPreview {
    #[serde(flatten)]
    pub details: OrderDetails,
    pub unit_price: i64,
    pub total_price: i64,
    pub formatted_total: String,
}

impl OrderPreview {
    fn new(details: OrderDetails, quote: &Quote) -> Self {
        Self {
            details,
            unit_price: quote.unit_price,
            total_price: quote.total_price,
            formatted_total: quote.formatted_total.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    #[serde(flatten)]
    pub preview: OrderPreview,
    pub payment_reference: String,
}

/// What the customer needs to complete payment
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    #[serde(flatten)]
    pub session: TransactionSession,
    pub order_data: PendingOrder,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentVerification {
    /// `success` or `failed`; anything short of success counts as failed
    pub status: PaymentStatus,
    pub data: TransactionVerification,
}

impl PaymentVerification {
    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationOutcome {
    Created(Order),
    PaymentFailed(PaymentVerification),
}

/// Drives preview -> payment initialization -> verification -> order creation
pub struct OrderCoordinator {
    pricing: PricingCalculator,
    gateway: Arc<dyn PaymentGateway>,
    orders: Arc<dyn OrderRepository>,
    notifier: Arc<dyn Notifier>,
    references: ReferenceGenerator,
}

impl OrderCoordinator {
    pub fn new(
        pricing: PricingCalculator,
        gateway: Arc<dyn PaymentGateway>,
        orders: Arc<dyn OrderRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pricing,
            gateway,
            orders,
            notifier,
            references: ReferenceGenerator::default(),
        }
    }

    pub fn with_reference_generator(mut self, references: ReferenceGenerator) -> Self {
        self.references = references;
        self
    }

    pub fn pricing(&self) -> &PricingCalculator {
        &self.pricing
    }

    fn quote(&self, details: &OrderDetails) -> CoreResult<Quote> {
        details.ensure_valid()?;
        Ok(self.pricing.quote_named(&details.pizza_type, &details.pizza_size, details.quantity)?)
    }

    /// Price a checkout without persisting anything
    pub fn preview(&self, details: OrderDetails) -> CoreResult<OrderPreview> {
        let quote = self.quote(&details)?;
        Ok(OrderPreview::new(details, &quote))
    }

    /// Generate a reference and open a gateway transaction for the computed total
    pub async fn initialize_payment(&self, details: OrderDetails) -> CoreResult<PaymentSession> {
        let quote = self.quote(&details)?;
        let reference = self.references.generate();

        let session = self
            .gateway
            .initialize_transaction(&details.email, quote.total_price, &reference)
            .await?;

        info!(
            reference = %reference,
            customer = %Masked(&details.email),
            total = quote.total_price,
            stage = ?CheckoutStage::PaymentInitialized,
            "Payment initialized"
        );

        Ok(PaymentSession {
            session,
            order_data: PendingOrder {
                preview: OrderPreview::new(details, &quote),
                payment_reference: reference,
            },
        })
    }

    /// Ask the gateway how the transaction behind `reference` ended
    pub async fn verify_payment(&self, reference: &str) -> CoreResult<PaymentVerification> {
        check_reference(reference)?;

        let data = self.gateway.verify_transaction(reference).await?;
        let status = if data.status == TransactionStatus::Success {
            PaymentStatus::Success
        } else {
            PaymentStatus::Failed
        };

        info!(reference = %reference, status = ?data.status, stage = ?CheckoutStage::PaymentVerified, "Payment verified");
        Ok(PaymentVerification { status, data })
    }

    /// Persist a paid order and fire the customer confirmation.
    ///
    /// The confirmation runs detached: its latency and failures never reach the caller.
    pub async fn create_order(&self, paid: PaidOrder) -> CoreResult<Order> {
        paid.ensure_valid()?;
        check_reference(&paid.payment_reference)?;
        let quote = self.quote(&paid.details)?;
        let order = Order::confirmed(paid, quote);

        self.orders.insert_order(&order).await?;
        info!(
            order_id = %order.id,
            reference = %order.payment_reference,
            stage = ?CheckoutStage::OrderCreated,
            "Order created"
        );

        self.dispatch_confirmation(order.clone());
        Ok(order)
    }

    /// Verify with the gateway, then create the order only if the payment succeeded
    pub async fn confirm_payment(&self, paid: PaidOrder) -> CoreResult<ConfirmationOutcome> {
        paid.ensure_valid()?;
        let verification = self.verify_payment(&paid.payment_reference).await?;
        if !verification.is_success() {
            info!(
                reference = %paid.payment_reference,
                stage = ?CheckoutStage::PaymentFailed,
                "Payment not successful, order not created"
            );
            return Ok(ConfirmationOutcome::PaymentFailed(verification));
        }

        self.create_order(paid).await.map(ConfirmationOutcome::Created)
    }

    pub async fn find_by_reference(&self, reference: &str) -> CoreResult<Order> {
        check_reference(reference)?;
        self.orders
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("order with reference {}", reference)))
    }

    /// Reconcile an existing order after a gateway event.
    ///
    /// The event body is unauthenticated, so its outcome is never trusted: the transaction is
    /// re-verified with the gateway and the status it reports is applied. Events for unknown
    /// references, and transactions still in flight, are ignored.
    pub async fn apply_gateway_event(&self, event: &str, reference: &str) -> CoreResult<Option<Order>> {
        check_reference(reference)?;

        let Some(order) = self.orders.find_by_reference(reference).await? else {
            info!(event = %event, reference = %reference, "Gateway event for reference without an order");
            return Ok(None);
        };

        let verified = self.gateway.verify_transaction(reference).await?;
        let status = match verified.status {
            TransactionStatus::Success => PaymentStatus::Success,
            TransactionStatus::Failed | TransactionStatus::Reversed => PaymentStatus::Failed,
            TransactionStatus::Abandoned | TransactionStatus::Pending => {
                info!(event = %event, reference = %reference, status = ?verified.status, "Transaction not settled, ignoring event");
                return Ok(None);
            }
        };

        let updated = self.orders.update_payment_status(order.id, status).await?;
        info!(
            order_id = %order.id,
            event = %event,
            status = status.as_str(),
            "Payment status reconciled with gateway"
        );
        Ok(updated)
    }

    fn dispatch_confirmation(&self, order: Order) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.order_confirmed(&order).await {
                warn!(
                    order_id = %order.id,
                    reference = %order.payment_reference,
                    error = %e,
                    "Order confirmation failed; order was created"
                );
            }
        });
    }
}

const MAX_REFERENCE_LEN: usize = 100;

/// References are embedded in gateway URLs, so only `[A-Za-z0-9_-]` is accepted.
fn check_reference(reference: &str) -> CoreResult<()> {
    let well_formed = !reference.is_empty()
        && reference.len() <= MAX_REFERENCE_LEN
        && reference.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !well_formed {
        return Err(CoreError::ValidationError(format!("malformed payment reference '{}'", reference)));
    }
    Ok(())
}

/// Gateway stand-in for local development and tests.
///
/// Every transaction succeeds unless its reference was marked as failed; `offline` fails every call.
#[derive(Debug, Default, Clone)]
pub struct MockPaymentGateway {
    failed_references: HashSet<String>,
    offline: bool,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failed_reference(mut self, reference: impl Into<String>) -> Self {
        self.failed_references.insert(reference.into());
        self
    }

    pub fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }

    fn check_online(&self) -> CoreResult<()> {
        if self.offline {
            return Err(CoreError::PaymentGatewayError("Simulated Payment Gateway Failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn initialize_transaction(
        &self,
        _email: &str,
        _amount: i64,
        reference: &str,
    ) -> CoreResult<TransactionSession> {
        self.check_online()?;
        Ok(TransactionSession {
            authorization_url: format!("https://checkout.mock/{}", reference),
            access_code: format!("mock_{}", reference),
            reference: reference.to_string(),
        })
    }

    async fn verify_transaction(&self, reference: &str) -> CoreResult<TransactionVerification> {
        self.check_online()?;
        let failed = self.failed_references.contains(reference);
        Ok(TransactionVerification {
            reference: reference.to_string(),
            status: if failed { TransactionStatus::Failed } else { TransactionStatus::Success },
            amount: 0,
            gateway_response: Some(if failed { "Declined" } else { "Approved" }.to_string()),
            paid_at: if failed { None } else { Some(chrono::Utc::now()) },
        })
    }
}
