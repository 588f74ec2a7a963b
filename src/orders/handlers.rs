// HTTP handlers for order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::orders::{
    CreateOrderRequest, Order, OrderError, OrderStatus, UpdateStatusRequest, VerifyPickupRequest,
};

/// Query parameters for order history
#[derive(Debug, Deserialize)]
pub struct OrderHistoryQuery {
    /// Optional status filter
    pub status: Option<OrderStatus>,
}

/// Handler for POST /api/orders
/// Creates a new order for the authenticated customer
pub async fn create_order_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let order = state
        .order_service
        .create_order(user.profile_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Handler for GET /api/orders
/// Retrieves order history for the authenticated customer, newest first
pub async fn get_order_history_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Query(query): Query<OrderHistoryQuery>,
) -> Result<Json<Vec<Order>>, OrderError> {
    let orders = state
        .order_service
        .get_customer_orders(user.profile_id, query.status)
        .await?;

    Ok(Json(orders))
}

/// Handler for GET /api/orders/{order_id}
/// Retrieves a specific order by ID
pub async fn get_order_by_id_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, OrderError> {
    // Authorization check is done in the service layer
    let order = state.order_service.get_order_by_id(order_id, &user).await?;

    Ok(Json(order))
}

/// Handler for PATCH /api/orders/{order_id}/status
/// Drives a status transition (customers may only cancel their own orders)
pub async fn update_order_status_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let order = state
        .order_service
        .update_order_status(order_id, &user, request.status)
        .await?;

    Ok(Json(order))
}

/// Handler for POST /api/orders/{order_id}/verify
/// Verifies a pickup QR token and completes the order (store-side only)
pub async fn verify_pickup_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<VerifyPickupRequest>,
) -> Result<Json<Order>, OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let order = state
        .order_service
        .verify_pickup(order_id, &user, &request.qr_code_hash)
        .await?;

    Ok(Json(order))
}
