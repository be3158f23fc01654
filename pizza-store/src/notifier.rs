use async_trait::async_trait;
use tracing::info;
use pizza_core::notification::{ConfirmationMessage, Notifier};
use pizza_core::{CoreResult, Order};
use pizza_shared::Masked;

/// Writes confirmations to the log. Used when no message broker is configured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn order_confirmed(&self, order: &Order) -> CoreResult<()> {
        let message = ConfirmationMessage::for_order(order);
        info!(
            recipient = %Masked(&message.recipient),
            subject = %message.subject,
            "Order confirmation ready (no broker configured)"
        );
        Ok(())
    }
}
