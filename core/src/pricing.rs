//! Discount pricing strategies.
//!
//! Every strategy implements [`PricingStrategy`]: a pure `matches_item`
//! predicate and an `item_price` computation that assumes the predicate holds.
//! Strategies are immutable once constructed; constructors validate their
//! parameters and fail fast with [`ConfigError`].
//!
//! Competing strategies for the same item are resolved by the price
//! calculator, which picks the cheapest applicable price. Per-customer
//! eligibility is layered on top via [`MembershipGate`] and [`DiscountRule`]
//! rather than baked into the strategies themselves.

use crate::cart::OrderItem;
use crate::customer::{Customer, MembershipLevel};
use crate::error::{ConfigError, PricingError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// A discount rule variant: decides whether it applies to a line item and, if
/// so, computes a price for it.
pub trait PricingStrategy: Send + Sync {
    /// Human-readable name for receipts and logs.
    fn name(&self) -> &str;

    /// Whether this strategy applies to `item`. Pure and total.
    fn matches_item(&self, item: &OrderItem) -> bool;

    /// The price this strategy yields for `item`.
    ///
    /// # Errors
    ///
    /// [`PricingError::NotApplicable`] if `matches_item(item)` is false.
    fn item_price(&self, item: &OrderItem) -> Result<Decimal, PricingError>;
}

fn not_applicable(strategy: &dyn PricingStrategy, item: &OrderItem) -> PricingError {
    PricingError::NotApplicable {
        strategy: strategy.name().to_string(),
        identifier: item.identifier.clone(),
    }
}

fn validate_item_id(item_id: &str) -> Result<(), ConfigError> {
    if item_id.trim().is_empty() {
        return Err(ConfigError::EmptyItemId);
    }
    Ok(())
}

fn validate_discount(discount: Decimal) -> Result<(), ConfigError> {
    if discount <= Decimal::ZERO || discount >= Decimal::ONE {
        return Err(ConfigError::DiscountOutOfRange(discount));
    }
    Ok(())
}

fn percent(discount: Decimal) -> Decimal {
    (discount * Decimal::ONE_HUNDRED).normalize()
}

/// The default, full-price strategy: applies to everything, discounts nothing.
#[derive(Clone, Debug, Default)]
pub struct FullPrice;

impl PricingStrategy for FullPrice {
    fn name(&self) -> &str {
        "Full price."
    }

    fn matches_item(&self, _item: &OrderItem) -> bool {
        true
    }

    fn item_price(&self, item: &OrderItem) -> Result<Decimal, PricingError> {
        Ok(item.full_cost())
    }
}

/// A flat percentage off every unit of one item.
#[derive(Clone, Debug)]
pub struct FlatPercentOff {
    item_id: String,
    discount: Decimal,
    name: String,
}

impl FlatPercentOff {
    /// Creates a flat discount of `discount` (a fraction in `(0, 1)`) on
    /// `item_id`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyItemId`] or [`ConfigError::DiscountOutOfRange`].
    pub fn new(item_id: impl Into<String>, discount: Decimal) -> Result<Self, ConfigError> {
        let item_id = item_id.into();
        validate_item_id(&item_id)?;
        validate_discount(discount)?;
        let name = format!("DISCOUNT: {} - {}% off.", item_id, percent(discount));
        Ok(Self {
            item_id,
            discount,
            name,
        })
    }
}

impl PricingStrategy for FlatPercentOff {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_item(&self, item: &OrderItem) -> bool {
        item.identifier == self.item_id
    }

    fn item_price(&self, item: &OrderItem) -> Result<Decimal, PricingError> {
        if !self.matches_item(item) {
            return Err(not_applicable(self, item));
        }
        Ok(item.full_cost() * (Decimal::ONE - self.discount))
    }
}

/// Buy at least X units and every complete multiple of X is discounted.
///
/// The remainder below a full multiple of the threshold stays at full price.
#[derive(Clone, Debug)]
pub struct BuyXGetYPercentOff {
    item_id: String,
    threshold_qty: u32,
    discount: Decimal,
    name: String,
}

impl BuyXGetYPercentOff {
    /// Creates a threshold discount: buying at least `threshold_qty` units of
    /// `item_id` gives `discount` off each unit in a complete multiple of the
    /// threshold.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyItemId`], [`ConfigError::QuantityTooSmall`], or
    /// [`ConfigError::DiscountOutOfRange`].
    pub fn new(
        item_id: impl Into<String>,
        threshold_qty: u32,
        discount: Decimal,
    ) -> Result<Self, ConfigError> {
        let item_id = item_id.into();
        validate_item_id(&item_id)?;
        if threshold_qty < 1 {
            return Err(ConfigError::QuantityTooSmall {
                what: "threshold quantity",
            });
        }
        validate_discount(discount)?;
        let name = format!(
            "DISCOUNT: Buy {}, get {}% off.",
            threshold_qty,
            percent(discount)
        );
        Ok(Self {
            item_id,
            threshold_qty,
            discount,
            name,
        })
    }
}

impl PricingStrategy for BuyXGetYPercentOff {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_item(&self, item: &OrderItem) -> bool {
        item.identifier == self.item_id && item.quantity >= self.threshold_qty
    }

    fn item_price(&self, item: &OrderItem) -> Result<Decimal, PricingError> {
        if !self.matches_item(item) {
            return Err(not_applicable(self, item));
        }
        let full_cost_qty = item.quantity % self.threshold_qty;
        let discounted_qty = item.quantity - full_cost_qty;
        let discounted = Decimal::from(discounted_qty)
            * (Decimal::ONE - self.discount)
            * item.unit_cost;
        Ok(discounted + Decimal::from(full_cost_qty) * item.unit_cost)
    }
}

/// Buy X units, get the next Y free.
///
/// The quantity is partitioned into blocks of `buy_qty + free_qty`. A full
/// block charges `buy_qty` units. A trailing block shorter than `buy_qty` is
/// charged in full; a trailing block of at least `buy_qty` units charges
/// exactly `buy_qty`, so the charge per block is capped at `buy_qty` units
/// even when the block is too short to grant the whole free allotment.
#[derive(Clone, Debug)]
pub struct BuyXGetYFree {
    item_id: String,
    buy_qty: u32,
    free_qty: u32,
    name: String,
}

impl BuyXGetYFree {
    /// Creates a buy-X-get-Y-free discount on `item_id`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyItemId`] or [`ConfigError::QuantityTooSmall`].
    pub fn new(
        item_id: impl Into<String>,
        buy_qty: u32,
        free_qty: u32,
    ) -> Result<Self, ConfigError> {
        let item_id = item_id.into();
        validate_item_id(&item_id)?;
        if buy_qty < 1 {
            return Err(ConfigError::QuantityTooSmall {
                what: "buy quantity",
            });
        }
        if free_qty < 1 {
            return Err(ConfigError::QuantityTooSmall {
                what: "free quantity",
            });
        }
        let name = format!("DISCOUNT: Buy {buy_qty} get {free_qty} free.");
        Ok(Self {
            item_id,
            buy_qty,
            free_qty,
            name,
        })
    }
}

impl PricingStrategy for BuyXGetYFree {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_item(&self, item: &OrderItem) -> bool {
        item.identifier == self.item_id && item.quantity >= self.buy_qty
    }

    fn item_price(&self, item: &OrderItem) -> Result<Decimal, PricingError> {
        if !self.matches_item(item) {
            return Err(not_applicable(self, item));
        }
        let block = self.buy_qty.saturating_add(self.free_qty);
        let mut remaining = item.quantity;
        let mut total = Decimal::ZERO;
        while remaining > 0 {
            let charged = remaining.min(self.buy_qty);
            total += Decimal::from(charged) * item.unit_cost;
            remaining = remaining.saturating_sub(block);
        }
        Ok(total)
    }
}

/// An eligibility filter on top of a strategy: the customer's membership tier
/// must fall within `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MembershipGate {
    min: MembershipLevel,
    max: MembershipLevel,
}

impl MembershipGate {
    /// Creates a gate admitting tiers in `[min, max]` inclusive.
    ///
    /// # Errors
    ///
    /// [`ConfigError::GateLevelsInverted`] if `min > max`.
    pub fn new(min: MembershipLevel, max: MembershipLevel) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::GateLevelsInverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a gate admitting `level` and everything above it.
    #[must_use]
    pub const fn at_least(level: MembershipLevel) -> Self {
        Self {
            min: level,
            max: MembershipLevel::Gold,
        }
    }

    /// Whether the customer's tier falls within the gate.
    ///
    /// Anonymous customers never pass a gate.
    #[must_use]
    pub fn admits(&self, customer: Option<&Customer>) -> bool {
        customer.is_some_and(|c| self.min <= c.level && c.level <= self.max)
    }
}

/// A discount rule as served by the repository: a strategy plus an optional
/// membership gate.
#[derive(Clone)]
pub struct DiscountRule {
    strategy: Arc<dyn PricingStrategy>,
    gate: Option<MembershipGate>,
}

impl DiscountRule {
    /// A rule available to every customer.
    #[must_use]
    pub fn ungated(strategy: Arc<dyn PricingStrategy>) -> Self {
        Self {
            strategy,
            gate: None,
        }
    }

    /// A rule restricted to the membership tiers the gate admits.
    #[must_use]
    pub fn gated(strategy: Arc<dyn PricingStrategy>, gate: MembershipGate) -> Self {
        Self {
            strategy,
            gate: Some(gate),
        }
    }

    /// The wrapped strategy.
    #[must_use]
    pub fn strategy(&self) -> &dyn PricingStrategy {
        self.strategy.as_ref()
    }

    /// Whether the rule applies: the strategy matches the item and the gate,
    /// if any, admits the customer.
    #[must_use]
    pub fn applies(&self, customer: Option<&Customer>, item: &OrderItem) -> bool {
        self.strategy.matches_item(item)
            && self.gate.is_none_or(|gate| gate.admits(customer))
    }
}

impl std::fmt::Debug for DiscountRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountRule")
            .field("strategy", &self.strategy.name())
            .field("gate", &self.gate)
            .finish()
    }
}
