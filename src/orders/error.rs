use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Order not found")]
    NotFound,

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Item is not available: {0}")]
    ItemUnavailable(String),

    #[error("Insufficient stock: only {available} left")]
    InsufficientStock { available: i32 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("QR code does not match this order")]
    QrMismatch,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Pricing error: {0}")]
    PricingError(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            OrderError::DatabaseError(msg) => {
                tracing::error!("Order database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            OrderError::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_string()),
            OrderError::ItemNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Item with id {} not found", id),
            ),
            OrderError::ItemUnavailable(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::InsufficientStock { available } => (
                StatusCode::BAD_REQUEST,
                format!("Insufficient stock: only {} left", available),
            ),
            OrderError::InvalidQuantity(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            OrderError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            OrderError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::QrMismatch => (
                StatusCode::FORBIDDEN,
                "QR code does not match this order".to_string(),
            ),
            OrderError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::PricingError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
