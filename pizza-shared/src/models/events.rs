use uuid::Uuid;

/// Published once an order has been persisted; consumed by the mailer.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct OrderConfirmedEvent {
    pub order_id: Uuid,
    pub payment_reference: String,
    pub recipient: crate::pii::Masked<String>,
    pub subject: String,
    pub body: String,
    pub total_price: i64,
    pub timestamp: i64,
}
