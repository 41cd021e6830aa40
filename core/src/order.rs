//! Orders, payment details, and the order lifecycle.
//!
//! An [`Order`] owns its cart and payment details exclusively. Its state
//! transitions forward only and is mutated solely by the checkout
//! orchestrator; a decided order is never re-run.

use crate::cart::ShoppingCart;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a payment is to be collected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Charge a credit card.
    CreditCard,
    /// Charge a debit card.
    DebitCard,
    /// Collect through PayPal.
    PayPal,
}

/// Opaque payment payload forwarded to the payment collaborator.
///
/// The core performs no validation on these fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Collection method.
    pub method: PaymentMethod,
    /// Card number, as entered.
    pub card_number: String,
    /// Card expiry.
    pub expiry: DateTime<Utc>,
    /// Name on the card.
    pub holder_name: String,
}

/// Lifecycle of an order through checkout.
///
/// `AwaitingProcess` is the only state checkout accepts; the other three are
/// terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Initial state, ready for checkout.
    AwaitingProcess,
    /// Terminal failure: inventory could not be reserved.
    InventoryReservationFailed,
    /// Terminal failure: payment was rejected.
    PaymentFailed,
    /// Terminal success.
    Processed,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingProcess => write!(f, "awaiting process"),
            Self::InventoryReservationFailed => write!(f, "inventory reservation failed"),
            Self::PaymentFailed => write!(f, "payment failed"),
            Self::Processed => write!(f, "processed"),
        }
    }
}

/// A cart plus payment details, moving through the checkout lifecycle.
#[derive(Debug)]
pub struct Order {
    cart: ShoppingCart,
    payment_details: PaymentDetails,
    state: OrderState,
}

impl Order {
    /// Creates an order awaiting processing.
    #[must_use]
    pub const fn new(cart: ShoppingCart, payment_details: PaymentDetails) -> Self {
        Self {
            cart,
            payment_details,
            state: OrderState::AwaitingProcess,
        }
    }

    /// The order's cart.
    #[must_use]
    pub const fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    /// The payment details to charge.
    #[must_use]
    pub const fn payment_details(&self) -> &PaymentDetails {
        &self.payment_details
    }

    /// Where the order is in its lifecycle.
    #[must_use]
    pub const fn state(&self) -> OrderState {
        self.state
    }

    /// Advances the lifecycle. Only the checkout orchestrator transitions
    /// orders.
    pub(crate) const fn set_state(&mut self, state: OrderState) {
        self.state = state;
    }
}
