use uuid::Uuid;

use crate::orders::{Order, OrderStatus};

/// Pure eligibility rules for leaving a review.
pub struct ReviewEligibility;

impl ReviewEligibility {
    /// A customer may review an order only if they placed it, the order was
    /// completed, and it has not been reviewed yet.
    pub fn can_review(order: &Order, customer_id: Uuid, already_reviewed: bool) -> bool {
        order.customer_id == customer_id
            && order.status == OrderStatus::Completed
            && !already_reviewed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order_with(status: OrderStatus, customer_id: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_id,
            store_id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            quantity: 1,
            total_price: dec!(15.00),
            status,
            qr_code_hash: "deadbeef".repeat(8),
            collected_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_completed_own_unreviewed_order_is_eligible() {
        let customer = Uuid::new_v4();
        let order = order_with(OrderStatus::Completed, customer);
        assert!(ReviewEligibility::can_review(&order, customer, false));
    }

    #[test]
    fn test_someone_elses_order_is_not_eligible() {
        let order = order_with(OrderStatus::Completed, Uuid::new_v4());
        assert!(!ReviewEligibility::can_review(&order, Uuid::new_v4(), false));
    }

    #[test]
    fn test_non_completed_statuses_are_not_eligible() {
        let customer = Uuid::new_v4();
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Ready,
            OrderStatus::Cancelled,
        ] {
            let order = order_with(status, customer);
            assert!(!ReviewEligibility::can_review(&order, customer, false));
        }
    }

    #[test]
    fn test_already_reviewed_order_is_not_eligible() {
        let customer = Uuid::new_v4();
        let order = order_with(OrderStatus::Completed, customer);
        assert!(!ReviewEligibility::can_review(&order, customer, true));
    }
}
