use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::items::{Item, ItemStatus, ItemWithStore};

/// Repository for database operations on items
#[derive(Clone)]
pub struct ItemsRepository {
    pool: PgPool,
}

impl ItemsRepository {
    /// Create a new ItemsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new item listing
    pub async fn create(
        &self,
        store_id: Uuid,
        title: &str,
        original_price: Decimal,
        discount_price: Decimal,
        quantity: i32,
        status: ItemStatus,
        tags: &[String],
        image_url: Option<&str>,
    ) -> Result<Item, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (store_id, title, original_price, discount_price, quantity, status, tags, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, store_id, title, original_price, discount_price, quantity, status,
                      tags, image_url, created_at, updated_at
            "#,
        )
        .bind(store_id)
        .bind(title)
        .bind(original_price)
        .bind(discount_price)
        .bind(quantity)
        .bind(status)
        .bind(tags)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Find an item by ID
    pub async fn find_by_id(&self, item_id: Uuid) -> Result<Option<Item>, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, store_id, title, original_price, discount_price, quantity, status,
                   tags, image_url, created_at, updated_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Fetch all purchasable items joined with the minimal store display
    /// fields, newest listings first
    pub async fn find_active_with_store(&self) -> Result<Vec<ItemWithStore>, sqlx::Error> {
        let items = sqlx::query_as::<_, ItemWithStore>(
            r#"
            SELECT i.id, i.store_id, i.title, i.original_price, i.discount_price,
                   i.quantity, i.status, i.tags, i.image_url,
                   s.name AS store_name, s.is_kosher AS store_is_kosher
            FROM items i
            JOIN stores s ON s.id = i.store_id
            WHERE i.status = 'available' AND i.quantity > 0 AND s.is_approved = TRUE
            ORDER BY i.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
