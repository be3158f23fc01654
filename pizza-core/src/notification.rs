use async_trait::async_trait;

use crate::models::Order;
use crate::CoreResult;

/// Customer-facing side effects of a confirmed order.
///
/// Failures are reported as `NotificationError` and never change the outcome of the order.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn order_confirmed(&self, order: &Order) -> CoreResult<()>;
}

/// Plain-text order confirmation sent to the customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl ConfirmationMessage {
    pub fn for_order(order: &Order) -> Self {
        let subject = format!("Your Pizza Order Confirmation - {}", order.payment_reference);

        let body = [
            "Thank you for your order! Here are your order details:".to_string(),
            String::new(),
            format!("Order Reference:  {}", order.payment_reference),
            format!("Name:             {}", order.full_name),
            format!("Email:            {}", order.email),
            format!("Phone:            {}", order.phone),
            format!("Pizza Type:       {}", order.pizza_type),
            format!("Size:             {}", order.pizza_size),
            format!("Quantity:         {}", order.quantity),
            format!("Unit Price:       {}", pizza_catalog::pricing::format_naira(order.unit_price)),
            format!("Total Price:      {}", pizza_catalog::pricing::format_naira(order.total_price)),
            format!("Delivery Address: {}", order.delivery_address),
            format!("Payment Status:   {}", order.payment_status.as_str().to_uppercase()),
            String::new(),
            "Your order is being processed and will be delivered to the address above.".to_string(),
            "You will receive another notification when your order is out for delivery.".to_string(),
            String::new(),
            "Thank you for choosing Pizza Hub!".to_string(),
        ]
        .join("\n");

        Self {
            recipient: order.email.clone(),
            subject,
            body,
        }
    }
}
