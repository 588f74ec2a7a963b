// HTTP handlers for review endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::reviews::{CreateReviewRequest, Review, ReviewError, StoreReviewsResponse};

/// Query parameters for listing a store's reviews
#[derive(Debug, Deserialize)]
pub struct StoreReviewsQuery {
    pub store_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Handler for POST /api/reviews
/// Creates a review for one of the authenticated customer's completed orders
pub async fn create_review_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ReviewError> {
    request
        .validate()
        .map_err(|e| ReviewError::ValidationError(e.to_string()))?;

    let review = state
        .review_service
        .create_review(user.profile_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Handler for GET /api/reviews?store_id=...&limit=...&offset=...
/// Public listing of a store's reviews with its aggregate rating
pub async fn get_store_reviews_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<StoreReviewsQuery>,
) -> Result<Json<StoreReviewsResponse>, ReviewError> {
    let store_id = query.store_id.ok_or_else(|| {
        ReviewError::ValidationError("store_id query parameter is required".to_string())
    })?;

    let response = state
        .review_service
        .get_store_reviews(store_id, query.limit, query.offset)
        .await?;

    Ok(Json(response))
}
