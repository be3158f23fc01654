use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Admin, Order, PaymentStatus};
use crate::CoreResult;

/// Order persistence. `payment_reference` is unique across all orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Fails with `DuplicateReference` when the reference is already taken.
    async fn insert_order(&self, order: &Order) -> CoreResult<()>;

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>>;

    async fn find_by_reference(&self, reference: &str) -> CoreResult<Option<Order>>;

    /// Newest first
    async fn list_orders(&self) -> CoreResult<Vec<Order>>;

    async fn mark_delivered(&self, id: Uuid) -> CoreResult<Option<Order>>;

    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> CoreResult<Option<Order>>;

    async fn delete_order(&self, id: Uuid) -> CoreResult<Option<Order>>;
}

/// Admin credentials. `email` is unique.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create_admin(&self, admin: &Admin) -> CoreResult<()>;

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Admin>>;

    async fn record_login(&self, id: Uuid) -> CoreResult<()>;
}
