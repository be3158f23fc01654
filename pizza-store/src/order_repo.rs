use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;
use chrono::{DateTime, Utc};
use pizza_core::repository::OrderRepository;
use pizza_core::{CoreError, CoreResult, Order, PaymentStatus};

use crate::database::map_db_error;

const ORDER_COLUMNS: &str = "id, full_name, phone, email, pizza_type, pizza_size, quantity, unit_price, \
     total_price, delivery_address, amount_paid, payment_reference, payment_status, delivery_status, \
     created_at, updated_at";

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    full_name: String,
    phone: String,
    email: String,
    pizza_type: String,
    pizza_size: String,
    quantity: i32,
    unit_price: i64,
    total_price: i64,
    delivery_address: String,
    amount_paid: i64,
    payment_reference: String,
    payment_status: String,
    delivery_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = CoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: pizza_catalog::PricingError| CoreError::StorageError(format!("order {}: {}", id, e));
        Ok(Order {
            id,
            pizza_type: row.pizza_type.parse().map_err(corrupt)?,
            pizza_size: row.pizza_size.parse().map_err(corrupt)?,
            quantity: u32::try_from(row.quantity)
                .map_err(|_| CoreError::StorageError(format!("order {}: negative quantity", id)))?,
            full_name: row.full_name,
            phone: row.phone,
            email: row.email,
            unit_price: row.unit_price,
            total_price: row.total_price,
            delivery_address: row.delivery_address,
            amount_paid: row.amount_paid,
            payment_reference: row.payment_reference,
            payment_status: row.payment_status.parse()?,
            delivery_status: row.delivery_status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn storage(err: sqlx::Error) -> CoreError {
    CoreError::StorageError(err.to_string())
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn insert_order(&self, order: &Order) -> CoreResult<()> {
        let quantity = i32::try_from(order.quantity)
            .map_err(|_| CoreError::ValidationError(format!("quantity {} is out of range", order.quantity)))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, full_name, phone, email, pizza_type, pizza_size, quantity, unit_price,
                                total_price, delivery_address, amount_paid, payment_reference,
                                payment_status, delivery_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(order.id)
        .bind(&order.full_name)
        .bind(&order.phone)
        .bind(&order.email)
        .bind(order.pizza_type.as_str())
        .bind(order.pizza_size.as_str())
        .bind(quantity)
        .bind(order.unit_price)
        .bind(order.total_price)
        .bind(&order.delivery_address)
        .bind(order.amount_paid)
        .bind(&order.payment_reference)
        .bind(order.payment_status.as_str())
        .bind(order.delivery_status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, || CoreError::DuplicateReference(order.payment_reference.clone())))?;

        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .map(Order::try_from)
            .transpose()
    }

    async fn find_by_reference(&self, reference: &str) -> CoreResult<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE payment_reference = $1", ORDER_COLUMNS);
        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .map(Order::try_from)
            .transpose()
    }

    async fn list_orders(&self) -> CoreResult<Vec<Order>> {
        let sql = format!("SELECT {} FROM orders ORDER BY created_at DESC", ORDER_COLUMNS);
        sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn mark_delivered(&self, id: Uuid) -> CoreResult<Option<Order>> {
        // updated_at only moves on the first flip
        let sql = format!(
            "UPDATE orders SET delivery_status = 'delivered', \
                 updated_at = CASE WHEN delivery_status = 'delivered' THEN updated_at ELSE NOW() END \
             WHERE id = $1 RETURNING {}",
            ORDER_COLUMNS
        );
        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .map(Order::try_from)
            .transpose()
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> CoreResult<Option<Order>> {
        let sql = format!(
            "UPDATE orders SET payment_status = $1, \
                 updated_at = CASE WHEN payment_status = $1 THEN updated_at ELSE NOW() END \
             WHERE id = $2 RETURNING {}",
            ORDER_COLUMNS
        );
        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .map(Order::try_from)
            .transpose()
    }

    async fn delete_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        let sql = format!("DELETE FROM orders WHERE id = $1 RETURNING {}", ORDER_COLUMNS);
        sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .map(Order::try_from)
            .transpose()
    }
}
