pub mod models;
pub mod repository;
pub mod payment;
pub mod notification;

pub use models::{Admin, AdminRole, DeliveryStatus, Order, OrderDetails, PaidOrder, PaymentStatus, MAX_QUANTITY};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Duplicate payment reference: {0}")]
    DuplicateReference(String),
    #[error("Payment gateway error: {0}")]
    PaymentGatewayError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Notification failed: {0}")]
    NotificationError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<pizza_catalog::PricingError> for CoreError {
    fn from(err: pizza_catalog::PricingError) -> Self {
        match err {
            pizza_catalog::PricingError::InvalidSelection(msg) => CoreError::InvalidSelection(msg),
            pizza_catalog::PricingError::InvalidQuantity(_) => CoreError::ValidationError(err.to_string()),
        }
    }
}
