use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::config::MAX_ITEM_QUANTITY;
use crate::items::{Availability, ItemsRepository};
use crate::orders::{
    CreateOrderRequest, Order, OrderError, OrdersRepository, OrderStatus, QrCode, StatusMachine,
};
use crate::pricing::DiscountCalculator;

/// Service for order business logic
#[derive(Clone)]
pub struct OrderService {
    orders_repo: OrdersRepository,
    items_repo: ItemsRepository,
}

impl OrderService {
    /// Create a new OrderService
    pub fn new(orders_repo: OrdersRepository, items_repo: ItemsRepository) -> Self {
        Self {
            orders_repo,
            items_repo,
        }
    }

    /// Create a new order for an item.
    ///
    /// The total is priced from the item's current discount price and frozen
    /// on the order row. The pickup QR hash is generated here, before the
    /// insert, so the repository writes the complete row in one transaction.
    /// Stock is re-checked under a row lock inside that transaction; the
    /// availability checks here only produce friendlier errors for the
    /// common case.
    pub async fn create_order(
        &self,
        customer_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<Order, OrderError> {
        if request.quantity <= 0 {
            return Err(OrderError::InvalidQuantity(format!(
                "Quantity must be positive, got {}",
                request.quantity
            )));
        }
        if request.quantity > MAX_ITEM_QUANTITY {
            return Err(OrderError::InvalidQuantity(format!(
                "Quantity may not exceed {} per order",
                MAX_ITEM_QUANTITY
            )));
        }

        let item = self
            .items_repo
            .find_by_id(request.item_id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .ok_or(OrderError::ItemNotFound(request.item_id))?;

        if !Availability::is_available(&item) {
            return Err(OrderError::ItemUnavailable(format!(
                "Item '{}' is no longer available",
                item.title
            )));
        }

        if request.quantity > item.quantity {
            return Err(OrderError::InsufficientStock {
                available: item.quantity,
            });
        }

        let total_price = DiscountCalculator::order_total(item.discount_price, request.quantity);

        let order_id = Uuid::new_v4();
        let qr_code_hash = QrCode::generate_hash(order_id, customer_id);

        let order = self
            .orders_repo
            .create(
                order_id,
                customer_id,
                item.store_id,
                item.id,
                request.quantity,
                total_price,
                &qr_code_hash,
            )
            .await?;

        tracing::info!(
            "Created order {} for customer {} ({} x item {})",
            order.id,
            customer_id,
            order.quantity,
            order.item_id
        );

        Ok(order)
    }

    /// Get all orders for a customer with optional status filter, newest
    /// first
    pub async fn get_customer_orders(
        &self,
        customer_id: Uuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderError> {
        self.orders_repo.find_by_customer(customer_id, status).await
    }

    /// Get a specific order. Customers may only see their own orders;
    /// store-side roles may see any.
    pub async fn get_order_by_id(
        &self,
        order_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !user.role.is_store_side() && order.customer_id != user.profile_id {
            return Err(OrderError::Forbidden(
                "You do not have permission to access this order".to_string(),
            ));
        }

        Ok(order)
    }

    /// Drive an order status transition.
    ///
    /// Customers may only cancel their own orders, and only while the order
    /// is pending or confirmed. Store-side roles may drive any transition
    /// the table allows, including cancelling a ready order. Cancellation
    /// restores the reserved stock in the same transaction as the status
    /// write; completion stamps collected_at. The repository guards the
    /// write with the status read here, so of two racing transitions only
    /// one applies.
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        user: &AuthenticatedUser,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !user.role.is_store_side() {
            if order.customer_id != user.profile_id {
                return Err(OrderError::Forbidden(
                    "You do not have permission to modify this order".to_string(),
                ));
            }
            if new_status != OrderStatus::Cancelled {
                return Err(OrderError::Forbidden(
                    "Customers may only cancel their orders".to_string(),
                ));
            }
            if !order.status.is_cancellable() {
                return Err(OrderError::InvalidTransition(format!(
                    "Order in status '{}' can no longer be cancelled",
                    order.status
                )));
            }
        }

        StatusMachine::transition(order.status, new_status)
            .map_err(OrderError::InvalidTransition)?;

        let updated_order = if new_status == OrderStatus::Cancelled {
            // Cancelled stock goes back on sale
            self.orders_repo.cancel(order_id, order.status).await?
        } else {
            let collected_at = if new_status == OrderStatus::Completed {
                Some(Utc::now())
            } else {
                None
            };

            self.orders_repo
                .update_status(order_id, order.status, new_status, collected_at)
                .await?
        };

        tracing::info!(
            "Order {} transitioned from '{}' to '{}'",
            order_id,
            order.status,
            new_status
        );

        Ok(updated_order)
    }

    /// Verify a pickup QR token and complete the order.
    ///
    /// Store-side only. The presented token must match the stored hash and
    /// the order must be ready for pickup.
    pub async fn verify_pickup(
        &self,
        order_id: Uuid,
        user: &AuthenticatedUser,
        qr_code_hash: &str,
    ) -> Result<Order, OrderError> {
        if !user.role.is_store_side() {
            return Err(OrderError::Forbidden(
                "Only store accounts can verify pickups".to_string(),
            ));
        }

        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !QrCode::verify(qr_code_hash, &order.qr_code_hash) {
            return Err(OrderError::QrMismatch);
        }

        if !order.status.is_completable() {
            return Err(OrderError::InvalidTransition(format!(
                "Order in status '{}' is not ready for pickup",
                order.status
            )));
        }

        let updated_order = self
            .orders_repo
            .update_status(
                order_id,
                OrderStatus::Ready,
                OrderStatus::Completed,
                Some(Utc::now()),
            )
            .await?;

        tracing::info!("Order {} picked up and completed", order_id);

        Ok(updated_order)
    }
}
