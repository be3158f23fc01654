//! Process-local stores for development (`paystack.mode = "mock"`) and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use chrono::Utc;
use pizza_core::repository::{AdminRepository, OrderRepository};
use pizza_core::{Admin, CoreError, CoreResult, Order, PaymentStatus};

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert_order(&self, order: &Order) -> CoreResult<()> {
        // Single write lock: the reference check and the insert are atomic.
        let mut orders = self.orders.write().await;
        if orders.values().any(|o| o.payment_reference == order.payment_reference) {
            return Err(CoreError::DuplicateReference(order.payment_reference.clone()));
        }
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> CoreResult<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .find(|o| o.payment_reference == reference)
            .cloned())
    }

    async fn list_orders(&self) -> CoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn mark_delivered(&self, id: Uuid) -> CoreResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.get_mut(&id).map(|order| {
            order.mark_delivered();
            order.clone()
        }))
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> CoreResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.get_mut(&id).map(|order| {
            order.set_payment_status(status);
            order.clone()
        }))
    }

    async fn delete_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        Ok(self.orders.write().await.remove(&id))
    }
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: RwLock<HashMap<Uuid, Admin>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create_admin(&self, admin: &Admin) -> CoreResult<()> {
        let mut admins = self.admins.write().await;
        if admins.values().any(|a| a.email == admin.email) {
            return Err(CoreError::ValidationError(format!("admin {} already exists", admin.email)));
        }
        admins.insert(admin.id, admin.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Admin>> {
        Ok(self.admins.read().await.values().find(|a| a.email == email).cloned())
    }

    async fn record_login(&self, id: Uuid) -> CoreResult<()> {
        let mut admins = self.admins.write().await;
        let admin = admins
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(format!("admin {}", id)))?;
        let now = Utc::now();
        admin.last_login = Some(now);
        admin.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizza_catalog::{PizzaSize, PizzaType, PricingCalculator};
    use pizza_core::{AdminRole, DeliveryStatus, OrderDetails, PaidOrder};

    fn order(reference: &str) -> Order {
        let quote = PricingCalculator::default()
            .quote(PizzaType::Hawaiian, PizzaSize::Small, 3)
            .unwrap();
        Order::confirmed(
            PaidOrder {
                details: OrderDetails {
                    full_name: "Tunde Bakare".to_string(),
                    phone: "08021111111".to_string(),
                    email: "tunde@example.com".to_string(),
                    pizza_type: "Hawaiian".to_string(),
                    pizza_size: "Small".to_string(),
                    quantity: 3,
                    delivery_address: "4 Awolowo Road".to_string(),
                },
                payment_reference: reference.to_string(),
                amount_paid: 8400,
            },
            quote,
        )
    }

    #[tokio::test]
    async fn test_duplicate_reference_rejected_and_first_kept() {
        let repo = InMemoryOrderRepository::new();
        let first = order("PIZZA_1_aaaaaa");
        repo.insert_order(&first).await.unwrap();

        let err = repo.insert_order(&order("PIZZA_1_aaaaaa")).await.unwrap_err();
        assert!(matches!(err, CoreError::DuplicateReference(r) if r == "PIZZA_1_aaaaaa"));

        let stored = repo.find_by_reference("PIZZA_1_aaaaaa").await.unwrap().unwrap();
        assert_eq!(stored, first);
        assert_eq!(repo.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryOrderRepository::new();
        let older = order("PIZZA_1_older0");
        let mut newer = order("PIZZA_2_newer0");
        newer.created_at = older.created_at + chrono::Duration::seconds(5);
        repo.insert_order(&older).await.unwrap();
        repo.insert_order(&newer).await.unwrap();

        let listed = repo.list_orders().await.unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[tokio::test]
    async fn test_mark_delivered_and_delete() {
        let repo = InMemoryOrderRepository::new();
        let o = order("PIZZA_3_dlvr00");
        repo.insert_order(&o).await.unwrap();

        let delivered = repo.mark_delivered(o.id).await.unwrap().unwrap();
        assert_eq!(delivered.delivery_status, DeliveryStatus::Delivered);
        assert!(repo.mark_delivered(Uuid::new_v4()).await.unwrap().is_none());

        let removed = repo.delete_order(o.id).await.unwrap().unwrap();
        assert_eq!(removed.id, o.id);
        assert!(repo.get_order(o.id).await.unwrap().is_none());
        assert!(repo.delete_order(o.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_admin_login_recorded() {
        let repo = InMemoryAdminRepository::new();
        let admin = Admin::new("boss@pizzahub.ng".to_string(), "hash".to_string(), AdminRole::Admin);
        repo.create_admin(&admin).await.unwrap();
        assert!(repo.create_admin(&admin).await.is_err());

        repo.record_login(admin.id).await.unwrap();
        let stored = repo.find_by_email("boss@pizzahub.ng").await.unwrap().unwrap();
        assert!(stored.last_login.is_some());
    }
}
