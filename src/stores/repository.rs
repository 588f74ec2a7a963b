use sqlx::PgPool;
use uuid::Uuid;

use crate::stores::{Store, StoreRatingSummary};

/// Repository for database operations on stores
#[derive(Clone)]
pub struct StoresRepository {
    pool: PgPool,
}

impl StoresRepository {
    /// Create a new StoresRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check if a store exists
    pub async fn exists(&self, store_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
                .bind(store_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Find a store by ID
    pub async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, sqlx::Error> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, owner_id, name, description, address, is_kosher, is_approved,
                   average_rating, review_count, created_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Fetch the trigger-maintained rating aggregates for a store
    pub async fn rating_summary(
        &self,
        store_id: Uuid,
    ) -> Result<Option<StoreRatingSummary>, sqlx::Error> {
        let summary = sqlx::query_as::<_, StoreRatingSummary>(
            "SELECT average_rating, review_count FROM stores WHERE id = $1",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }
}
