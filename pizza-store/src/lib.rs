pub mod app_config;
pub mod database;
pub mod order_repo;
pub mod admin_repo;
pub mod memory;
pub mod paystack;
pub mod notifier;
#[cfg(feature = "kafka")]
pub mod events;

pub use database::DbClient;
pub use order_repo::StoreOrderRepository;
pub use admin_repo::StoreAdminRepository;
pub use memory::{InMemoryAdminRepository, InMemoryOrderRepository};
pub use paystack::PaystackGateway;
pub use notifier::LogNotifier;
#[cfg(feature = "kafka")]
pub use events::EventProducer;
