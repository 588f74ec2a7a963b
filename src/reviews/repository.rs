use sqlx::PgPool;
use uuid::Uuid;

use crate::reviews::{Review, ReviewError, ReviewWithReviewer};

/// Repository for database operations on reviews
#[derive(Clone)]
pub struct ReviewsRepository {
    pool: PgPool,
}

impl ReviewsRepository {
    /// Create a new ReviewsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new review. The unique constraint on order_id rejects a
    /// second review for the same order; the From<sqlx::Error> impl maps
    /// that violation to DuplicateReview.
    pub async fn create(
        &self,
        order_id: Uuid,
        store_id: Uuid,
        customer_id: Uuid,
        rating: i16,
        comment: Option<&str>,
        photo_urls: &[String],
    ) -> Result<Review, ReviewError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (order_id, store_id, customer_id, rating, comment, photo_urls)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, order_id, store_id, customer_id, rating, comment, photo_urls, created_at
            "#,
        )
        .bind(order_id)
        .bind(store_id)
        .bind(customer_id)
        .bind(rating)
        .bind(comment)
        .bind(photo_urls)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    /// Find the review attached to an order, if any (for duplicate detection)
    pub async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Review>, ReviewError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, order_id, store_id, customer_id, rating, comment, photo_urls, created_at
            FROM reviews
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// Fetch a page of a store's reviews with reviewer display names, newest
    /// first
    pub async fn find_by_store(
        &self,
        store_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewWithReviewer>, ReviewError> {
        let reviews = sqlx::query_as::<_, ReviewWithReviewer>(
            r#"
            SELECT r.id, r.order_id, r.store_id, r.customer_id, r.rating, r.comment,
                   r.photo_urls, p.full_name AS reviewer_name, r.created_at
            FROM reviews r
            LEFT JOIN profiles p ON p.id = r.customer_id
            WHERE r.store_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(store_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// All ratings for a store, for histogram aggregation
    pub async fn ratings_for_store(&self, store_id: Uuid) -> Result<Vec<i16>, ReviewError> {
        let ratings: Vec<i16> = sqlx::query_scalar(
            r#"
            SELECT rating FROM reviews WHERE store_id = $1
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }
}
