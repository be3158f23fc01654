use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaystackWebhook {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /payment/webhook
///
/// Always acknowledges so the gateway stops retrying; problems are logged.
pub async fn handle_paystack_webhook(
    State(state): State<AppState>,
    payload: Result<Json<PaystackWebhook>, axum::extract::rejection::JsonRejection>,
) -> Json<WebhookAck> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Discarding malformed webhook: {}", rejection.body_text());
            return Json(WebhookAck { received: false });
        }
    };

    tracing::info!("Received webhook: {} for reference {}", payload.event, payload.data.reference);

    match state
        .coordinator
        .apply_gateway_event(&payload.event, &payload.data.reference)
        .await
    {
        Ok(Some(order)) => {
            tracing::info!(
                "Order {} payment status set to {} via webhook",
                order.id,
                order.payment_status.as_str()
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Webhook for {} could not be applied: {}", payload.data.reference, e);
            return Json(WebhookAck { received: false });
        }
    }

    Json(WebhookAck { received: true })
}
