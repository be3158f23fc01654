use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use pizza_core::repository::OrderRepository;
use pizza_core::{CoreError, CoreResult, Order};

/// Dashboard totals. Revenue counts delivered orders only.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub delivered_orders: usize,
    pub pending_orders: usize,
    pub total_revenue: i64,
    /// Percentage of orders delivered, 0 when there are no orders
    pub delivery_rate: f64,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let total_orders = orders.len();
        let (delivered_orders, total_revenue) = orders
            .iter()
            .filter(|o| o.is_delivered())
            .fold((0usize, 0i64), |(count, revenue), o| (count + 1, revenue + o.total_price));

        let delivery_rate = if total_orders == 0 {
            0.0
        } else {
            delivered_orders as f64 / total_orders as f64 * 100.0
        };

        Self {
            total_orders,
            delivered_orders,
            pending_orders: total_orders - delivered_orders,
            total_revenue,
            delivery_rate,
        }
    }
}

/// Back-office operations over persisted orders
pub struct OrderAdmin {
    orders: Arc<dyn OrderRepository>,
}

impl OrderAdmin {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn list_orders(&self) -> CoreResult<Vec<Order>> {
        self.orders.list_orders().await
    }

    pub async fn get_order(&self, id: Uuid) -> CoreResult<Order> {
        self.orders.get_order(id).await?.ok_or_else(|| not_found(id))
    }

    /// Idempotent: delivering an already delivered order returns it unchanged
    pub async fn mark_delivered(&self, id: Uuid) -> CoreResult<Order> {
        let order = self.orders.mark_delivered(id).await?.ok_or_else(|| not_found(id))?;
        info!(order_id = %id, "Order marked as delivered");
        Ok(order)
    }

    pub async fn delete_order(&self, id: Uuid) -> CoreResult<Order> {
        let order = self.orders.delete_order(id).await?.ok_or_else(|| not_found(id))?;
        info!(order_id = %id, reference = %order.payment_reference, "Order deleted");
        Ok(order)
    }

    pub async fn stats(&self) -> CoreResult<OrderStats> {
        let orders = self.orders.list_orders().await?;
        Ok(OrderStats::from_orders(&orders))
    }
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound(format!("order {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizza_catalog::{PizzaSize, PizzaType, PricingCalculator};
    use pizza_core::{DeliveryStatus, OrderDetails, PaidOrder};
    use pizza_store::InMemoryOrderRepository;

    fn order(reference: &str, size: PizzaSize, quantity: u32) -> Order {
        let quote = PricingCalculator::default()
            .quote(PizzaType::Hawaiian, size, quantity)
            .unwrap();
        Order::confirmed(
            PaidOrder {
                details: OrderDetails {
                    full_name: "Tunde Bakare".to_string(),
                    phone: "08120000000".to_string(),
                    email: "tunde@example.com".to_string(),
                    pizza_type: "Hawaiian".to_string(),
                    pizza_size: size.to_string(),
                    quantity,
                    delivery_address: "3 Awolowo Road, Ikoyi".to_string(),
                },
                payment_reference: reference.to_string(),
                amount_paid: quote.total_price,
            },
            quote,
        )
    }

    async fn seeded() -> (OrderAdmin, Vec<Order>) {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let orders = vec![
            order("PIZZA_1_aaaaaa", PizzaSize::Small, 1),
            order("PIZZA_2_bbbbbb", PizzaSize::Medium, 2),
            order("PIZZA_3_cccccc", PizzaSize::Large, 1),
        ];
        for o in &orders {
            repo.insert_order(o).await.unwrap();
        }
        (OrderAdmin::new(repo), orders)
    }

    #[test]
    fn test_stats_empty() {
        let stats = OrderStats::from_orders(&[]);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_revenue, 0);
        assert_eq!(stats.delivery_rate, 0.0);
    }

    #[test]
    fn test_stats_counts_delivered_revenue_only() {
        let mut delivered = order("PIZZA_1_aaaaaa", PizzaSize::Medium, 2);
        delivered.mark_delivered();
        let pending = order("PIZZA_2_bbbbbb", PizzaSize::Large, 1);

        let stats = OrderStats::from_orders(&[delivered.clone(), pending]);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.delivered_orders, 1);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.total_revenue, delivered.total_price);
        assert_eq!(stats.delivery_rate, 50.0);
    }

    #[tokio::test]
    async fn test_mark_delivered_is_idempotent() {
        let (admin, orders) = seeded().await;
        let id = orders[1].id;

        let first = admin.mark_delivered(id).await.unwrap();
        assert_eq!(first.delivery_status, DeliveryStatus::Delivered);

        let second = admin.mark_delivered(id).await.unwrap();
        assert_eq!(second.delivery_status, DeliveryStatus::Delivered);
        assert_eq!(second.updated_at, first.updated_at);

        let stats = admin.stats().await.unwrap();
        assert_eq!(stats.delivered_orders, 1);
        assert_eq!(stats.total_revenue, orders[1].total_price);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (admin, _) = seeded().await;
        let missing = Uuid::new_v4();

        assert!(matches!(admin.get_order(missing).await, Err(CoreError::NotFound(_))));
        assert!(matches!(admin.mark_delivered(missing).await, Err(CoreError::NotFound(_))));
        assert!(matches!(admin.delete_order(missing).await, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_order() {
        let (admin, orders) = seeded().await;

        let deleted = admin.delete_order(orders[0].id).await.unwrap();
        assert_eq!(deleted.payment_reference, "PIZZA_1_aaaaaa");
        assert!(matches!(admin.get_order(orders[0].id).await, Err(CoreError::NotFound(_))));
        assert_eq!(admin.list_orders().await.unwrap().len(), 2);
    }
}
