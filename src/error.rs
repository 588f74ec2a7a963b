// Error handling module for the food-rescue API
// Provides the shared error taxonomy and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};

/// Shared error type for handlers that do not carry a domain-specific enum.
///
/// Each variant maps to a fixed HTTP status:
/// validation -> 400, unauthorized -> 401, forbidden -> 403, not found -> 404,
/// invalid state -> 400, conflict -> 409, database/internal -> 500.
#[derive(Debug)]
pub enum ApiError {
    /// Request input fails a schema constraint
    ValidationError(validator::ValidationErrors),

    /// No authenticated session where one is required
    Unauthorized(String),

    /// Authenticated but not entitled to the resource
    Forbidden(String),

    /// Referenced entity does not exist
    NotFound { resource: String, id: String },

    /// Entity exists but its status disallows the requested operation
    InvalidState(String),

    /// Uniqueness violation
    Conflict { message: String },

    /// Provider failure; details are logged server-side, never exposed
    DatabaseError(sqlx::Error),

    /// Unclassified internal failure
    InternalError(String),
}

/// Consistent error envelope returned by every endpoint.
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "VALIDATION_ERROR", "CONFLICT")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional field-level detail, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// ISO 8601 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(error_code: &str, message: String) -> Self {
        Self {
            error_code: error_code.to_string(),
            message,
            details: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Convert to HTTP status code and response body.
    ///
    /// Expected client errors are logged at debug level, security-relevant
    /// rejections at warn, provider failures at error. Database detail is
    /// filtered from the client response.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                let mut response =
                    ErrorResponse::new("VALIDATION_ERROR", "Request validation failed".to_string());
                response.details =
                    Some(serde_json::to_value(errors).unwrap_or(serde_json::json!({})));
                (StatusCode::BAD_REQUEST, response)
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized request: {}", message);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("UNAUTHORIZED", message.clone()),
                )
            }
            ApiError::Forbidden(message) => {
                warn!("Forbidden request: {}", message);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new("FORBIDDEN", message.clone()),
                )
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(
                        "NOT_FOUND",
                        format!("{} with id {} not found", resource, id),
                    ),
                )
            }
            ApiError::InvalidState(message) => {
                debug!("Invalid state: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("INVALID_STATE", message.clone()),
                )
            }
            ApiError::Conflict { message } => {
                warn!("Conflict error: {}", message);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("CONFLICT", message.clone()),
                )
            }
            ApiError::DatabaseError(db_error) => {
                error!("Database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("DATABASE_ERROR", "A database error occurred".to_string()),
                )
            }
            ApiError::InternalError(internal_msg) => {
                error!("Internal error: {}", internal_msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                    ),
                )
            }
        }
    }

    /// HTTP status code for this error without building the full body.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::Unauthorized("no session".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("not your order".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound {
                resource: "Order".to_string(),
                id: "abc".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidState("order is not completed".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict {
                message: "already reviewed".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InternalError("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_resource_and_id() {
        let err = ApiError::NotFound {
            resource: "Order".to_string(),
            id: "42".to_string(),
        };
        let (_, body) = err.to_error_response();
        assert_eq!(body.error_code, "NOT_FOUND");
        assert_eq!(body.message, "Order with id 42 not found");
    }
}
