use uuid::Uuid;

use crate::config::{DEFAULT_REVIEW_PAGE_SIZE, MAX_REVIEW_PAGE_SIZE};
use crate::orders::{OrdersRepository, OrderStatus};
use crate::reviews::{
    CreateReviewRequest, RatingCalculator, Review, ReviewEligibility, ReviewError,
    ReviewsRepository, StoreReviewsResponse,
};
use crate::stores::StoresRepository;

/// Service layer for review business logic
#[derive(Clone)]
pub struct ReviewService {
    reviews_repo: ReviewsRepository,
    orders_repo: OrdersRepository,
    stores_repo: StoresRepository,
}

impl ReviewService {
    /// Create a new ReviewService
    pub fn new(
        reviews_repo: ReviewsRepository,
        orders_repo: OrdersRepository,
        stores_repo: StoresRepository,
    ) -> Self {
        Self {
            reviews_repo,
            orders_repo,
            stores_repo,
        }
    }

    /// Create a review for a completed order.
    ///
    /// Eligibility is decided by `ReviewEligibility::can_review`; on failure
    /// the client learns the most specific reason: missing order, then
    /// ownership, then completion state, then duplication. The duplicate
    /// pre-check is best effort; the unique constraint on order_id settles
    /// concurrent submissions.
    pub async fn create_review(
        &self,
        customer_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<Review, ReviewError> {
        let order = self
            .orders_repo
            .find_by_id(request.order_id)
            .await
            .map_err(|e| ReviewError::DatabaseError(e.to_string()))?
            .ok_or(ReviewError::OrderNotFound)?;

        let already_reviewed = self
            .reviews_repo
            .find_by_order(request.order_id)
            .await?
            .is_some();

        if !ReviewEligibility::can_review(&order, customer_id, already_reviewed) {
            if order.customer_id != customer_id {
                return Err(ReviewError::Forbidden(
                    "You can only review your own orders".to_string(),
                ));
            }
            if order.status != OrderStatus::Completed {
                return Err(ReviewError::NotEligible(format!(
                    "Order in status '{}' cannot be reviewed until it is completed",
                    order.status
                )));
            }
            return Err(ReviewError::DuplicateReview);
        }

        let comment = request
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let review = self
            .reviews_repo
            .create(
                order.id,
                order.store_id,
                customer_id,
                request.rating,
                comment,
                &request.photo_urls,
            )
            .await?;

        tracing::info!(
            "Customer {} reviewed order {} with {} stars",
            customer_id,
            order.id,
            review.rating
        );

        Ok(review)
    }

    /// Get a page of a store's reviews together with its aggregate rating.
    /// Page size defaults to 20 and is capped at 100; out-of-range values
    /// are rejected rather than clamped.
    pub async fn get_store_reviews(
        &self,
        store_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<StoreReviewsResponse, ReviewError> {
        let limit = limit.unwrap_or(DEFAULT_REVIEW_PAGE_SIZE as i64);
        let offset = offset.unwrap_or(0);

        if limit < 1 || limit > MAX_REVIEW_PAGE_SIZE as i64 {
            return Err(ReviewError::InvalidPagination(format!(
                "limit must be between 1 and {}",
                MAX_REVIEW_PAGE_SIZE
            )));
        }
        if offset < 0 {
            return Err(ReviewError::InvalidPagination(
                "offset must not be negative".to_string(),
            ));
        }

        let summary = self
            .stores_repo
            .rating_summary(store_id)
            .await
            .map_err(|e| ReviewError::DatabaseError(e.to_string()))?
            .ok_or(ReviewError::StoreNotFound)?;

        let reviews = self
            .reviews_repo
            .find_by_store(store_id, limit, offset)
            .await?;

        let ratings = self.reviews_repo.ratings_for_store(store_id).await?;
        let distribution = RatingCalculator::distribution(ratings);

        Ok(StoreReviewsResponse {
            reviews,
            summary,
            distribution,
            limit,
            offset,
        })
    }
}
