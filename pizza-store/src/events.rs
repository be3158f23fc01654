use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{info, error};
use pizza_core::notification::{ConfirmationMessage, Notifier};
use pizza_core::{CoreError, CoreResult, Order};
use pizza_shared::models::events::OrderConfirmedEvent;

/// Publishes order confirmations for the mailer service
#[derive(Clone)]
pub struct EventProducer {
    producer: FutureProducer,
    topic: String,
}

impl EventProducer {
    pub fn new(brokers: &str, topic: &str) -> Result<Self, rdkafka::error::KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self { producer, topic: topic.to_string() })
    }

    pub async fn publish(&self, key: &str, payload: &str) -> Result<(), rdkafka::error::KafkaError> {
        let record = FutureRecord::to(&self.topic)
            .key(key)
            .payload(payload);

        match self.producer.send(record, Timeout::After(Duration::from_secs(0))).await {
            Ok(delivery) => {
                info!("Sent message to {}/{}: partition {} offset {}", self.topic, key, delivery.partition, delivery.offset);
                Ok(())
            }
            Err((e, _msg)) => {
                error!("Failed to send message to {}: {}", self.topic, e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Notifier for EventProducer {
    async fn order_confirmed(&self, order: &Order) -> CoreResult<()> {
        let message = ConfirmationMessage::for_order(order);
        let event = OrderConfirmedEvent {
            order_id: order.id,
            payment_reference: order.payment_reference.clone(),
            recipient: message.recipient.into(),
            subject: message.subject,
            body: message.body,
            total_price: order.total_price,
            timestamp: chrono::Utc::now().timestamp(),
        };

        let payload = serde_json::to_string(&event)
            .map_err(|e| CoreError::NotificationError(e.to_string()))?;

        self.publish(&order.payment_reference, &payload)
            .await
            .map_err(|e| CoreError::NotificationError(e.to_string()))
    }
}
