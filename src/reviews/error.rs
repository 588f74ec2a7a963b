use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for review operations
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Store not found")]
    StoreNotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Order is not eligible for review: {0}")]
    NotEligible(String),

    #[error("This order has already been reviewed")]
    DuplicateReview,

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for ReviewError {
    fn from(err: sqlx::Error) -> Self {
        // A unique violation on order_id means the order was reviewed
        // concurrently; surface it as the duplicate it is.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return ReviewError::DuplicateReview;
            }
        }
        ReviewError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ReviewError::DatabaseError(msg) => {
                tracing::error!("Review database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ReviewError::OrderNotFound => {
                (StatusCode::NOT_FOUND, "Order not found".to_string())
            }
            ReviewError::StoreNotFound => {
                (StatusCode::NOT_FOUND, "Store not found".to_string())
            }
            ReviewError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ReviewError::NotEligible(msg) => (StatusCode::BAD_REQUEST, msg),
            ReviewError::DuplicateReview => (
                StatusCode::CONFLICT,
                "This order has already been reviewed".to_string(),
            ),
            ReviewError::InvalidPagination(msg) => (StatusCode::BAD_REQUEST, msg),
            ReviewError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
