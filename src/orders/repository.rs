use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::items::{Availability, ItemStatus};
use crate::orders::{Order, OrderError, OrderStatus};

/// Repository for database operations on orders
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    /// Create a new OrdersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order and decrement the item's stock in one transaction.
    ///
    /// The item row is locked for the duration so two concurrent checkouts of
    /// the last unit cannot both succeed. The item's status is recomputed
    /// from the remaining stock before commit.
    pub async fn create(
        &self,
        order_id: Uuid,
        customer_id: Uuid,
        store_id: Uuid,
        item_id: Uuid,
        quantity: i32,
        total_price: Decimal,
        qr_code_hash: &str,
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let available: i32 = sqlx::query_scalar(
            r#"
            SELECT quantity FROM items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::ItemNotFound(item_id))?;

        if available < quantity {
            return Err(OrderError::InsufficientStock { available });
        }

        let remaining = Availability::remaining_quantity(available, quantity);
        let new_status = ItemStatus::for_quantity(remaining);

        sqlx::query(
            r#"
            UPDATE items SET quantity = $2, status = $3
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .bind(remaining)
        .bind(new_status)
        .execute(&mut *tx)
        .await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, customer_id, store_id, item_id, quantity, total_price, status, qr_code_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, customer_id, store_id, item_id, quantity, total_price, status,
                      qr_code_hash, collected_at, created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(customer_id)
        .bind(store_id)
        .bind(item_id)
        .bind(quantity)
        .bind(total_price)
        .bind(OrderStatus::Pending)
        .bind(qr_code_hash)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, store_id, item_id, quantity, total_price, status,
                   qr_code_hash, collected_at, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Find all orders for a customer with optional status filter, newest
    /// first
    pub async fn find_by_customer(
        &self,
        customer_id: Uuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = match status {
            Some(status) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, customer_id, store_id, item_id, quantity, total_price, status,
                           qr_code_hash, collected_at, created_at, updated_at
                    FROM orders
                    WHERE customer_id = $1 AND status = $2
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(customer_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, customer_id, store_id, item_id, quantity, total_price, status,
                           qr_code_hash, collected_at, created_at, updated_at
                    FROM orders
                    WHERE customer_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(customer_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Update an order's status, stamping collected_at when provided.
    ///
    /// The write is guarded by the expected current status; zero matched
    /// rows means the order left `from` concurrently and the transition no
    /// longer applies. updated_at is refreshed by a database trigger.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        collected_at: Option<DateTime<Utc>>,
    ) -> Result<Order, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $3, collected_at = COALESCE($4, collected_at)
            WHERE id = $1 AND status = $2
            RETURNING id, customer_id, store_id, item_id, quantity, total_price, status,
                      qr_code_hash, collected_at, created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(from)
        .bind(to)
        .bind(collected_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            OrderError::InvalidTransition(format!("Order is no longer in status '{}'", from))
        })?;

        Ok(order)
    }

    /// Cancel an order and restore its reserved stock in one transaction.
    ///
    /// The status write carries the same guard as `update_status`, so two
    /// racing cancellations (or a cancel racing a pickup) restock exactly
    /// once, and a failed restock rolls the cancellation back.
    pub async fn cancel(&self, order_id: Uuid, from: OrderStatus) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING id, customer_id, store_id, item_id, quantity, total_price, status,
                      qr_code_hash, collected_at, created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(from)
        .bind(OrderStatus::Cancelled)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            OrderError::InvalidTransition(format!("Order is no longer in status '{}'", from))
        })?;

        sqlx::query(
            r#"
            UPDATE items
            SET quantity = quantity + $2,
                status = CASE WHEN status = 'sold_out' THEN 'available' ELSE status END
            WHERE id = $1
            "#,
        )
        .bind(order.item_id)
        .bind(order.quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }
}
