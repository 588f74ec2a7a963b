// Application-wide constants shared across the domain modules

/// Lower bound of the allowed discount band, in percent.
pub const MIN_DISCOUNT_PERCENTAGE: u32 = 10;

/// Upper bound of the allowed discount band, in percent.
pub const MAX_DISCOUNT_PERCENTAGE: u32 = 90;

/// Maximum stock a single item listing may carry.
pub const MAX_ITEM_QUANTITY: i32 = 50;

/// Maximum length of a review comment, in characters.
pub const MAX_COMMENT_LENGTH: u64 = 500;

/// Maximum number of photos attached to a single review.
pub const MAX_REVIEW_PHOTOS: usize = 3;

/// Default page size for store review listings.
pub const DEFAULT_REVIEW_PAGE_SIZE: u32 = 20;

/// Maximum page size accepted for store review listings.
pub const MAX_REVIEW_PAGE_SIZE: u32 = 100;

/// Storage key under which the serialized cart is persisted on the device.
pub const CART_STORAGE_KEY: &str = "food-rescue-cart";

/// Dietary tags an item may carry. Tags outside this vocabulary are rejected
/// at the schema boundary.
pub const FOOD_TAGS: &[&str] = &[
    "meaty",
    "dairy",
    "vegan",
    "vegetarian",
    "gluten_free",
    "kosher",
    "halal",
];
