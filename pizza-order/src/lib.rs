pub mod reference;
pub mod orchestrator;
pub mod admin;

pub use reference::ReferenceGenerator;
pub use orchestrator::{
    CheckoutStage, ConfirmationOutcome, MockPaymentGateway, OrderCoordinator, OrderPreview,
    PaymentSession, PaymentVerification, PendingOrder,
};
pub use admin::{OrderAdmin, OrderStats};
