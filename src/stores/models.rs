use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Domain model representing a store in the database.
///
/// Rating aggregates are maintained by a database trigger on review inserts;
/// this crate only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Store {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub is_kosher: bool,
    pub is_approved: bool,
    pub average_rating: Option<Decimal>,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Rating aggregates surfaced alongside a store's review listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StoreRatingSummary {
    pub average_rating: Option<Decimal>,
    pub review_count: i32,
}
