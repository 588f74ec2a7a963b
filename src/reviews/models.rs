use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::MAX_COMMENT_LENGTH;
use crate::stores::StoreRatingSummary;
use crate::validation::validate_photo_urls;

/// Domain model representing a review in the database.
///
/// One review per order, enforced by a unique constraint on order_id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub order_id: Uuid,
    pub store_id: Uuid,
    pub customer_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub photo_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A review joined with the reviewer's display name, for store listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReviewWithReviewer {
    pub id: Uuid,
    pub order_id: Uuid,
    pub store_id: Uuid,
    pub customer_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub photo_urls: Vec<String>,
    pub reviewer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub order_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = "MAX_COMMENT_LENGTH", message = "Comment is too long"))]
    pub comment: Option<String>,

    #[serde(default)]
    #[validate(custom = "validate_photo_urls")]
    pub photo_urls: Vec<String>,
}

/// Paginated review listing for a store, with the store's aggregate rating
/// and star histogram
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreReviewsResponse {
    pub reviews: Vec<ReviewWithReviewer>,
    pub summary: StoreRatingSummary,
    /// Review counts bucketed by star, index 0 holding one-star reviews
    pub distribution: [u64; 5],
    pub limit: i64,
    pub offset: i64,
}
