//! Error taxonomy for the fulfillment core.
//!
//! Four families, matching where in the lifecycle things can go wrong:
//!
//! - [`ConfigError`]: construction-time contract violations (out-of-range
//!   discount parameters, empty identifiers). Always fatal to the constructor
//!   call, never recovered internally.
//! - [`PricingError`]: a pricing operation was invoked on an item the strategy
//!   does not match. The price calculator checks `matches_item` first, so
//!   seeing this error signals a programmer error in the caller.
//! - [`OrderFailure`]: the two checkout failure causes, each carrying the data
//!   needed to inspect what went wrong. Always surfaced wrapped in
//!   [`CheckoutError::OrderFailed`], never raw.
//! - [`CheckoutError`]: the single failure type raised by
//!   [`crate::checkout::OrderProcessor::checkout`].
//!
//! No error in this module triggers an automatic retry anywhere in the core;
//! all failures propagate to the immediate caller.

use crate::cart::OrderItem;
use crate::customer::MembershipLevel;
use crate::order::{OrderState, PaymentDetails};
use rust_decimal::Decimal;
use thiserror::Error;

/// Construction-time contract violation for a pricing strategy or gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The item identifier a discount applies to must not be empty.
    #[error("item identifier must not be empty")]
    EmptyItemId,

    /// Discount fractions are strictly between 0 and 1.
    #[error("discount must be strictly between 0 and 1, got {0}")]
    DiscountOutOfRange(Decimal),

    /// A quantity parameter (threshold, buy quantity, free quantity) was zero.
    #[error("{what} must be at least 1")]
    QuantityTooSmall {
        /// Which constructor parameter was out of range.
        what: &'static str,
    },

    /// A membership gate's minimum level exceeds its maximum.
    #[error("membership gate minimum {min:?} exceeds maximum {max:?}")]
    GateLevelsInverted {
        /// The gate's minimum level.
        min: MembershipLevel,
        /// The gate's maximum level.
        max: MembershipLevel,
    },
}

/// A pricing operation was applied to an item the strategy does not match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// `item_price` was called on a non-matching item.
    ///
    /// The calculator filters on `matches_item` before pricing, so this only
    /// surfaces when a strategy is invoked directly on the wrong item.
    #[error("strategy {strategy:?} does not apply to item {identifier:?}")]
    NotApplicable {
        /// Name of the strategy that rejected the item.
        strategy: String,
        /// Identifier of the rejected item.
        identifier: String,
    },
}

/// The underlying cause of a failed checkout.
///
/// Exactly one of these is wrapped by [`CheckoutError::OrderFailed`] and is
/// reachable through the error's source chain for inspection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderFailure {
    /// The inventory collaborator could not reserve the cart's items.
    #[error("could not reserve {} item(s) in inventory", items.len())]
    ReservationFailed {
        /// The items that could not be reserved.
        items: Vec<OrderItem>,
    },

    /// The payment collaborator rejected the charge.
    #[error("payment of {amount} was rejected")]
    PaymentRejected {
        /// The payment details that were rejected.
        details: PaymentDetails,
        /// The amount that could not be charged.
        amount: Decimal,
    },
}

/// Failure raised by [`crate::checkout::OrderProcessor::checkout`].
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Checkout was invoked on an order that is already decided.
    #[error("order is already decided (state {0:?})")]
    InvalidState(OrderState),

    /// A checkout step failed; the wrapped cause names the failing stage.
    #[error("order failed")]
    OrderFailed {
        /// The failing stage, preserved for inspection.
        #[source]
        cause: OrderFailure,
    },

    /// Computing the cart total failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl CheckoutError {
    /// The wrapped failure cause, if this is an [`CheckoutError::OrderFailed`].
    #[must_use]
    pub const fn failure(&self) -> Option<&OrderFailure> {
        match self {
            Self::OrderFailed { cause } => Some(cause),
            _ => None,
        }
    }
}
