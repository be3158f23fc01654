use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::CoreResult;

/// Transaction state as reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
    Abandoned,
    Reversed,
    Pending,
}

impl TransactionStatus {
    /// Map a provider status string; anything unrecognised is still in flight.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "success" => TransactionStatus::Success,
            "failed" => TransactionStatus::Failed,
            "abandoned" => TransactionStatus::Abandoned,
            "reversed" => TransactionStatus::Reversed,
            _ => TransactionStatus::Pending,
        }
    }
}

/// Checkout session handed back to the customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSession {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionVerification {
    pub reference: String,
    pub status: TransactionStatus,
    /// Amount in Naira (the provider works in kobo)
    pub amount: i64,
    pub gateway_response: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a transaction for `amount` Naira under our own `reference`
    async fn initialize_transaction(
        &self,
        email: &str,
        amount: i64,
        reference: &str,
    ) -> CoreResult<TransactionSession>;

    /// Ask the provider what happened to `reference`
    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> CoreResult<TransactionVerification>;
}
