use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use pizza_catalog::{PizzaSize, PizzaType, Quote};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{CoreError, CoreResult};

/// Outcome of the payment attempt behind an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(CoreError::StorageError(format!("unknown payment status '{}'", other))),
        }
    }
}

/// Whether the pizza has reached the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Undelivered,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Undelivered => "undelivered",
            DeliveryStatus::Delivered => "delivered",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undelivered" => Ok(DeliveryStatus::Undelivered),
            "delivered" => Ok(DeliveryStatus::Delivered),
            other => Err(CoreError::StorageError(format!("unknown delivery status '{}'", other))),
        }
    }
}

/// Largest quantity accepted in a single order
pub const MAX_QUANTITY: u32 = 1000;

/// Customer, pizza selection and delivery fields as submitted at checkout.
///
/// Menu membership of `pizza_type`/`pizza_size` is left to the pricing calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[validate(custom(function = "not_blank", message = "fullName must not be empty"))]
    pub full_name: String,
    #[validate(custom(function = "not_blank", message = "phone must not be empty"))]
    pub phone: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "pizzaType must not be empty"))]
    pub pizza_type: String,
    #[validate(custom(function = "not_blank", message = "pizzaSize must not be empty"))]
    pub pizza_size: String,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: u32,
    #[validate(custom(function = "not_blank", message = "deliveryAddress must not be empty"))]
    pub delivery_address: String,
}

impl OrderDetails {
    pub fn ensure_valid(&self) -> CoreResult<()> {
        Validate::validate(self).map_err(invalid)
    }
}

/// Checkout fields plus the gateway reference and the amount the customer paid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaidOrder {
    #[validate(nested)]
    pub details: OrderDetails,
    #[validate(custom(function = "not_blank", message = "paymentReference must not be empty"))]
    pub payment_reference: String,
    #[validate(range(min = 0, message = "amountPaid must not be negative"))]
    pub amount_paid: i64,
}

impl PaidOrder {
    pub fn ensure_valid(&self) -> CoreResult<()> {
        Validate::validate(self).map_err(invalid)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn invalid(errors: ValidationErrors) -> CoreError {
    CoreError::ValidationError(errors.to_string())
}

/// A persisted customer purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub pizza_type: PizzaType,
    pub pizza_size: PizzaSize,
    pub quantity: u32,
    pub unit_price: i64,
    pub total_price: i64,
    pub delivery_address: String,
    pub amount_paid: i64,
    pub payment_reference: String,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build the record for a confirmed payment. Prices come from the quote, never from the client.
    pub fn confirmed(paid: PaidOrder, quote: Quote) -> Self {
        let now = Utc::now();
        let details = paid.details;
        Self {
            id: Uuid::new_v4(),
            full_name: details.full_name,
            phone: details.phone,
            email: details.email,
            pizza_type: quote.pizza_type,
            pizza_size: quote.pizza_size,
            quantity: quote.quantity,
            unit_price: quote.unit_price,
            total_price: quote.total_price,
            delivery_address: details.delivery_address,
            amount_paid: paid.amount_paid,
            payment_reference: paid.payment_reference,
            payment_status: PaymentStatus::Success,
            delivery_status: DeliveryStatus::Undelivered,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.delivery_status == DeliveryStatus::Delivered
    }

    pub fn mark_delivered(&mut self) {
        if !self.is_delivered() {
            self.delivery_status = DeliveryStatus::Delivered;
            self.updated_at = Utc::now();
        }
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        if self.payment_status != status {
            self.payment_status = status;
            self.updated_at = Utc::now();
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            "super_admin" => Ok(AdminRole::SuperAdmin),
            other => Err(CoreError::Unauthorized(format!("unknown role '{}'", other))),
        }
    }
}

/// Dashboard credential holder
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(email: String, password_hash: String, role: AdminRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}
