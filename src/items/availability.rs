use crate::items::{Item, ItemStatus};

/// Pure stock/availability rules for item listings
pub struct Availability;

impl Availability {
    /// An item can be purchased only while its status is available and it
    /// still has stock.
    pub fn is_available(item: &Item) -> bool {
        item.status == ItemStatus::Available && item.quantity > 0
    }

    /// Stock left after a purchase, floored at zero.
    pub fn remaining_quantity(current_quantity: i32, purchase_quantity: i32) -> i32 {
        (current_quantity - purchase_quantity).max(0)
    }
}
