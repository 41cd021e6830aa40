//! Line items, products, and the shopping cart aggregate.
//!
//! A [`ShoppingCart`] owns its [`OrderItem`]s exclusively and keeps at most one
//! item per identifier: adding an identifier that is already present merges the
//! quantities instead of duplicating the line. Pricing is delegated to the
//! [`PriceCalculator`] the cart was constructed with, together with the cart's
//! optional customer context for membership-gated discounts.

use crate::calculator::PriceCalculator;
use crate::customer::Customer;
use crate::error::PricingError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One line in a cart: an item identifier, a quantity, and a unit cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item identifier, shared with the discount repository.
    pub identifier: String,
    /// Number of units ordered.
    pub quantity: u32,
    /// Cost of a single unit before any discount.
    pub unit_cost: Decimal,
}

impl OrderItem {
    /// Creates a line item.
    #[must_use]
    pub fn new(identifier: impl Into<String>, quantity: u32, unit_cost: Decimal) -> Self {
        Self {
            identifier: identifier.into(),
            quantity,
            unit_cost,
        }
    }

    /// The undiscounted cost of this line (`quantity * unit_cost`).
    #[must_use]
    pub fn full_cost(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_cost
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} @ {}", self.identifier, self.quantity, self.unit_cost)
    }
}

/// A catalog entry callers turn into line items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, used as the line item identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sales unit (e.g. "piece", "kg").
    pub unit: String,
    /// Price per unit.
    pub unit_price: Decimal,
}

impl Product {
    /// Builds a line item ordering `quantity` units of this product.
    #[must_use]
    pub fn line_item(&self, quantity: u32) -> OrderItem {
        OrderItem::new(self.id.clone(), quantity, self.unit_price)
    }
}

/// The cart aggregate: exclusively-owned line items plus pricing context.
///
/// Not thread-safe by design; callers serialize access externally.
pub struct ShoppingCart {
    items: Vec<OrderItem>,
    calculator: Arc<dyn PriceCalculator>,
    customer: Option<Customer>,
    customer_email: Option<String>,
}

impl ShoppingCart {
    /// Creates an empty, anonymous cart priced by `calculator`.
    #[must_use]
    pub fn new(calculator: Arc<dyn PriceCalculator>) -> Self {
        Self {
            items: Vec::new(),
            calculator,
            customer: None,
            customer_email: None,
        }
    }

    /// Attaches the customer context used for membership-gated discounts.
    #[must_use]
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Sets the email address order notifications go to.
    #[must_use]
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Adds an item to the cart.
    ///
    /// If an item with the same identifier is already present, its quantity is
    /// incremented; the cart never holds two lines for one identifier.
    pub fn add(&mut self, item: OrderItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.identifier == item.identifier)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Removes the item with the given identifier, if present.
    ///
    /// Removing an identifier that is not in the cart is a no-op.
    pub fn remove(&mut self, identifier: &str) {
        self.items.retain(|i| i.identifier != identifier);
    }

    /// The cart's line items.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The customer this cart is priced for, if known.
    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// The notification email, if one was set.
    #[must_use]
    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    /// Total cost of the cart at the cheapest applicable price per line.
    ///
    /// Side-effect-free and safe to call repeatedly; the discount repository is
    /// queried once per item per call.
    ///
    /// # Errors
    ///
    /// Propagates [`PricingError`] from the price calculator unchanged.
    pub fn total_cost(&self) -> Result<Decimal, PricingError> {
        self.calculator
            .cart_total(self.customer.as_ref(), &self.items)
    }
}

impl fmt::Debug for ShoppingCart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoppingCart")
            .field("items", &self.items)
            .field("customer", &self.customer)
            .field("customer_email", &self.customer_email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::calculator::DefaultPriceCalculator;
    use crate::pricing::DiscountRule;
    use crate::repository::DiscountRepository;
    use rust_decimal_macros::dec;

    struct NoDiscounts;

    impl DiscountRepository for NoDiscounts {
        fn discounts_for(&self, _item_id: &str) -> Vec<DiscountRule> {
            Vec::new()
        }

        fn discount_for_code(&self, _code: &str) -> Option<DiscountRule> {
            None
        }
    }

    fn cart() -> ShoppingCart {
        ShoppingCart::new(Arc::new(DefaultPriceCalculator::new(Arc::new(NoDiscounts))))
    }

    #[test]
    fn new_cart_is_empty() {
        assert!(cart().is_empty());
    }

    #[test]
    fn added_item_is_in_the_carts_items() {
        let mut cart = cart();
        let item = OrderItem::new("item-1", 1, dec!(50));
        cart.add(item.clone());

        assert_eq!(cart.items(), &[item]);
    }

    #[test]
    fn adding_an_existing_identifier_merges_quantities() {
        let mut cart = cart();
        cart.add(OrderItem::new("item-1", 1, dec!(50)));
        cart.add(OrderItem::new("item-1", 3, dec!(50)));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn merging_quantities_saturates_instead_of_wrapping() {
        let mut cart = cart();
        cart.add(OrderItem::new("item-1", u32::MAX, dec!(50)));
        cart.add(OrderItem::new("item-1", 5, dec!(50)));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn removing_an_item_empties_the_cart() {
        let mut cart = cart();
        cart.add(OrderItem::new("item-1", 1, dec!(50)));

        cart.remove("item-1");
        assert!(cart.is_empty());
    }

    #[test]
    fn removing_a_nonexistent_item_changes_nothing() {
        let mut cart = cart();
        cart.add(OrderItem::new("item-1", 1, dec!(50)));

        cart.remove("invalid-1");
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn total_cost_sums_full_prices_without_discounts() {
        let mut cart = cart();
        cart.add(OrderItem::new("item-1", 2, dec!(10)));
        cart.add(OrderItem::new("item-2", 1, dec!(5.50)));

        assert_eq!(cart.total_cost().unwrap(), dec!(25.50));
    }

    #[test]
    fn product_builds_matching_line_item() {
        let product = Product {
            id: "sku-9".to_string(),
            name: "Widget".to_string(),
            unit: "piece".to_string(),
            unit_price: dec!(19.99),
        };

        let item = product.line_item(3);
        assert_eq!(item.identifier, "sku-9");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.full_cost(), dec!(59.97));
    }
}
