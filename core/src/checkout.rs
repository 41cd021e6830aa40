//! The checkout orchestrator and its collaborator traits.
//!
//! [`OrderProcessor::checkout`] drives an order through a strict sequence:
//! reserve inventory, charge payment, notify the customer, hand the items to
//! delivery. Every step waits for the previous one. The single compensating
//! action in the core is the reservation cancellation issued when payment
//! fails after a successful reservation; it runs exactly once and is not
//! retried.
//!
//! Collaborators return a definite success/failure signal and own their own
//! timeout policy. They are injected as `Arc<dyn …>` constructor dependencies;
//! scripted mocks live in the `storefront-testing` crate.

use crate::cart::{OrderItem, ShoppingCart};
use crate::error::{CheckoutError, OrderFailure};
use crate::order::{Order, OrderState, PaymentDetails};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Inventory storage and reservation, as seen by the orchestrator.
pub trait InventoryService: Send + Sync {
    /// Reserves all of `items`. Returns `true` only if everything was
    /// reserved.
    fn reserve_items(&self, items: &[OrderItem]) -> bool;

    /// Releases a prior reservation. Assumed idempotent.
    fn cancel_reservation(&self, items: &[OrderItem]);

    /// Hands reserved items over to delivery.
    fn handout_items_to_delivery(&self, items: &[OrderItem]);
}

/// Payment capture.
pub trait PaymentService: Send + Sync {
    /// Charges `amount` against `details`. Returns `true` on capture.
    fn process_payment(&self, details: &PaymentDetails, amount: Decimal) -> bool;
}

/// Customer-facing order notifications.
pub trait NotificationService: Send + Sync {
    /// Tells the customer their order was created.
    fn notify_customer_order_created(&self, cart: &ShoppingCart);
}

/// Sequences the side-effecting checkout steps and transitions order state.
pub struct OrderProcessor {
    inventory: Arc<dyn InventoryService>,
    payment: Arc<dyn PaymentService>,
    notification: Arc<dyn NotificationService>,
}

impl OrderProcessor {
    /// Creates a processor over the three collaborators.
    #[must_use]
    pub fn new(
        inventory: Arc<dyn InventoryService>,
        payment: Arc<dyn PaymentService>,
        notification: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            inventory,
            payment,
            notification,
        }
    }

    /// Runs the checkout sequence for `order`.
    ///
    /// An empty cart returns immediately with no state change and no
    /// collaborator calls. A failed checkout always leaves the order's state
    /// set to the failing stage; inventory is never left reserved without a
    /// corresponding payment success.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidState`] if the order is already decided.
    /// - [`CheckoutError::OrderFailed`] wrapping the failing stage's cause.
    /// - [`CheckoutError::Pricing`] if the cart total cannot be computed; the
    ///   reservation is released before the error surfaces.
    #[tracing::instrument(skip(self, order), fields(items = order.cart().items().len()))]
    pub fn checkout(&self, order: &mut Order) -> Result<(), CheckoutError> {
        if order.cart().is_empty() {
            tracing::debug!("empty cart, nothing to do");
            return Ok(());
        }
        if order.state() != OrderState::AwaitingProcess {
            return Err(CheckoutError::InvalidState(order.state()));
        }

        if !self.inventory.reserve_items(order.cart().items()) {
            order.set_state(OrderState::InventoryReservationFailed);
            tracing::warn!("inventory reservation failed");
            return Err(CheckoutError::OrderFailed {
                cause: OrderFailure::ReservationFailed {
                    items: order.cart().items().to_vec(),
                },
            });
        }

        let total = match order.cart().total_cost() {
            Ok(total) => total,
            Err(err) => {
                // Release the reservation rather than strand it behind a
                // pricing failure.
                self.inventory.cancel_reservation(order.cart().items());
                return Err(err.into());
            }
        };

        if !self
            .payment
            .process_payment(order.payment_details(), total)
        {
            order.set_state(OrderState::PaymentFailed);
            // Compensating action: the reservation must be released before the
            // failure is surfaced, exactly once.
            self.inventory.cancel_reservation(order.cart().items());
            tracing::warn!(%total, "payment rejected, reservation cancelled");
            return Err(CheckoutError::OrderFailed {
                cause: OrderFailure::PaymentRejected {
                    details: order.payment_details().clone(),
                    amount: total,
                },
            });
        }

        self.notification.notify_customer_order_created(order.cart());
        self.inventory.handout_items_to_delivery(order.cart().items());
        order.set_state(OrderState::Processed);
        tracing::info!(%total, "order processed");
        Ok(())
    }
}
