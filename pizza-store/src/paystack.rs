use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};
use pizza_core::payment::{PaymentGateway, TransactionSession, TransactionStatus, TransactionVerification};
use pizza_core::{CoreError, CoreResult};

use crate::app_config::PaystackConfig;

/// Paystack transaction API client
pub struct PaystackGateway {
    http: reqwest::Client,
    base_url: Url,
    secret_key: String,
    callback_url: String,
}

/// Every Paystack response is wrapped in `{status, message, data}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    status: String,
    reference: String,
    /// kobo
    amount: i64,
    gateway_response: Option<String>,
    paid_at: Option<DateTime<Utc>>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> CoreResult<T> {
        if !self.status {
            return Err(CoreError::PaymentGatewayError(self.message));
        }
        self.data
            .ok_or_else(|| CoreError::PaymentGatewayError(format!("empty response: {}", self.message)))
    }
}

impl From<VerifyData> for TransactionVerification {
    fn from(data: VerifyData) -> Self {
        TransactionVerification {
            status: TransactionStatus::from_provider(&data.status),
            reference: data.reference,
            amount: data.amount / 100,
            gateway_response: data.gateway_response,
            paid_at: data.paid_at,
        }
    }
}

impl PaystackGateway {
    pub fn new(config: &PaystackConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(gateway_error)?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CoreError::PaymentGatewayError(format!("invalid base_url '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::PaymentGatewayError(format!("invalid base_url '{}'", config.base_url)));
        }

        Ok(Self {
            http,
            base_url,
            secret_key: config.secret_key.clone(),
            callback_url: config.callback_url.clone(),
        })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> CoreResult<Envelope<T>> {
        let status = response.status();
        let body = response.text().await.map_err(gateway_error)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Unreadable Paystack response ({}): {}", status, e);
            CoreError::PaymentGatewayError(format!("unexpected response from provider (HTTP {})", status))
        })
    }
}

fn gateway_error(err: reqwest::Error) -> CoreError {
    CoreError::PaymentGatewayError(err.to_string())
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize_transaction(
        &self,
        email: &str,
        amount: i64,
        reference: &str,
    ) -> CoreResult<TransactionSession> {
        debug!("Initializing Paystack transaction {}", reference);

        let response = self
            .http
            .post(self.endpoint(&["transaction", "initialize"]))
            .bearer_auth(&self.secret_key)
            .json(&json!({
                "email": email,
                "amount": amount * 100,
                "reference": reference,
                "callback_url": self.callback_url,
            }))
            .send()
            .await
            .map_err(gateway_error)?;

        let data: InitializeData = Self::read_envelope(response).await?.into_data()?;

        Ok(TransactionSession {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }

    async fn verify_transaction(&self, reference: &str) -> CoreResult<TransactionVerification> {
        debug!("Verifying Paystack transaction {}", reference);

        let response = self
            .http
            .get(self.endpoint(&["transaction", "verify", reference]))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(gateway_error)?;

        let data: VerifyData = Self::read_envelope(response).await?.into_data()?;
        Ok(data.into())
    }
}
