use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::pricing;

/// Item status derived from stock, or set externally when a listing expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    SoldOut,
    Expired,
}

impl ItemStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::SoldOut => "sold_out",
            ItemStatus::Expired => "expired",
        }
    }

    /// The status implied by a stock level. Expiry is an external decision
    /// and never derived here.
    pub fn for_quantity(quantity: i32) -> Self {
        if quantity > 0 {
            ItemStatus::Available
        } else {
            ItemStatus::SoldOut
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing a surplus food item offered by a store.
/// Items are never hard-deleted; expired listings keep their row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub store_id: Uuid,
    pub title: String,
    pub original_price: Decimal,
    pub discount_price: Decimal,
    pub quantity: i32,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item row joined with the minimal store display fields used by listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ItemWithStore {
    pub id: Uuid,
    pub store_id: Uuid,
    pub title: String,
    pub original_price: Decimal,
    pub discount_price: Decimal,
    pub quantity: i32,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub store_name: String,
    pub store_is_kosher: bool,
}

/// Request DTO for creating a new item listing
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_item_prices", skip_on_field_errors = true))]
pub struct CreateItemRequest {
    pub store_id: Uuid,
    #[validate(length(min = 3, max = 100, message = "Title must be 3 to 100 characters"))]
    pub title: String,
    #[validate(custom = "crate::validation::validate_positive_price")]
    pub original_price: Decimal,
    #[validate(custom = "crate::validation::validate_positive_price")]
    pub discount_price: Decimal,
    #[validate(range(min = 0, max = 50, message = "Quantity must be between 0 and 50"))]
    pub quantity: i32,
    #[validate(custom = "crate::validation::validate_food_tags")]
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Cross-field rule: the discount price must sit strictly below the original
/// price and inside the configured discount band.
fn validate_item_prices(request: &CreateItemRequest) -> Result<(), ValidationError> {
    pricing::validate_discount(request.original_price, request.discount_price)
}
