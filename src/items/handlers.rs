// HTTP handlers for item endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::items::{CreateItemRequest, Item, ItemStatus, ItemWithStore};
use crate::AppState;

/// Handler for GET /api/items
/// Returns all purchasable items with minimal store display fields
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "List of active items", body = Vec<ItemWithStore>),
        (status = 500, description = "Internal server error")
    ),
    tag = "items"
)]
pub async fn get_items_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemWithStore>>, ApiError> {
    tracing::debug!("Fetching active items");

    let items = state.items_repo.find_active_with_store().await?;

    tracing::debug!("Retrieved {} active items", items.len());
    Ok(Json(items))
}

/// Handler for POST /api/items
/// Creates a new item listing for a store (store-side roles only)
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input data"),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Customer sessions may not create listings"),
        (status = 404, description = "Store not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "items"
)]
pub async fn create_item_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    tracing::debug!("Creating item '{}' for store {}", request.title, request.store_id);

    if !user.role.is_store_side() {
        return Err(ApiError::Forbidden(
            "Only store accounts can create listings".to_string(),
        ));
    }

    request.validate()?;

    if !state.stores_repo.exists(request.store_id).await? {
        return Err(ApiError::NotFound {
            resource: "Store".to_string(),
            id: request.store_id.to_string(),
        });
    }

    // Initial status follows stock; expiry is only ever set externally
    let status = ItemStatus::for_quantity(request.quantity);

    let item = state
        .items_repo
        .create(
            request.store_id,
            &request.title,
            request.original_price,
            request.discount_price,
            request.quantity,
            status,
            &request.tags,
            request.image_url.as_deref(),
        )
        .await?;

    tracing::info!("Created item {} for store {}", item.id, item.store_id);
    Ok((StatusCode::CREATED, Json(item)))
}
