//! The discount pricing engine.
//!
//! [`DefaultPriceCalculator`] fetches candidate rules from the repository,
//! filters them down to the ones that apply to the item and customer, and
//! picks the cheapest price among them and the default full-price strategy.
//! Ties break arbitrarily; the result always equals the global minimum, and
//! since the price is the only output the tie-break choice is not observable.

use crate::cart::OrderItem;
use crate::customer::Customer;
use crate::error::PricingError;
use crate::pricing::{FullPrice, PricingStrategy};
use crate::repository::DiscountRepository;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Computes the price of line items for a given customer.
///
/// The cart holds one of these and delegates its total computation to it.
pub trait PriceCalculator: Send + Sync {
    /// The cheapest applicable price for one line item.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if a selected strategy fails to price the item.
    fn item_price(
        &self,
        customer: Option<&Customer>,
        item: &OrderItem,
    ) -> Result<Decimal, PricingError>;

    /// Sums [`PriceCalculator::item_price`] over a sequence of line items.
    ///
    /// Side-effect-free and safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Propagates the first [`PricingError`] encountered.
    fn cart_total(
        &self,
        customer: Option<&Customer>,
        items: &[OrderItem],
    ) -> Result<Decimal, PricingError> {
        items.iter().try_fold(Decimal::ZERO, |total, item| {
            Ok(total + self.item_price(customer, item)?)
        })
    }
}

/// The standard pricing engine: repository-backed with a configurable default.
pub struct DefaultPriceCalculator {
    repository: Arc<dyn DiscountRepository>,
    default: Arc<dyn PricingStrategy>,
}

impl DefaultPriceCalculator {
    /// Creates a calculator that falls back to [`FullPrice`] when no discount
    /// applies.
    #[must_use]
    pub fn new(repository: Arc<dyn DiscountRepository>) -> Self {
        Self::with_default(repository, Arc::new(FullPrice))
    }

    /// Creates a calculator with an explicit default strategy.
    ///
    /// The default must match every item it will be asked to price; a default
    /// that rejects an item surfaces as a [`PricingError`] from
    /// [`PriceCalculator::item_price`].
    #[must_use]
    pub fn with_default(
        repository: Arc<dyn DiscountRepository>,
        default: Arc<dyn PricingStrategy>,
    ) -> Self {
        Self {
            repository,
            default,
        }
    }

    /// The strategy used when no discount undercuts it.
    #[must_use]
    pub fn default_strategy(&self) -> &dyn PricingStrategy {
        self.default.as_ref()
    }
}

impl PriceCalculator for DefaultPriceCalculator {
    fn item_price(
        &self,
        customer: Option<&Customer>,
        item: &OrderItem,
    ) -> Result<Decimal, PricingError> {
        let mut best = self.default.item_price(item)?;

        for rule in self.repository.discounts_for(&item.identifier) {
            if !rule.applies(customer, item) {
                continue;
            }
            let candidate = rule.strategy().item_price(item)?;
            if candidate < best {
                tracing::debug!(
                    item = %item.identifier,
                    strategy = rule.strategy().name(),
                    %candidate,
                    "found cheaper price"
                );
                best = candidate;
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing::DiscountRule;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Repository stub that serves a fixed rule set and records queries.
    struct StubRepository {
        rules: Vec<DiscountRule>,
        queries: Mutex<Vec<String>>,
    }

    impl StubRepository {
        fn empty() -> Self {
            Self::with_rules(Vec::new())
        }

        fn with_rules(rules: Vec<DiscountRule>) -> Self {
            Self {
                rules,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl DiscountRepository for StubRepository {
        fn discounts_for(&self, item_id: &str) -> Vec<DiscountRule> {
            self.queries.lock().unwrap().push(item_id.to_string());
            self.rules.clone()
        }

        fn discount_for_code(&self, _code: &str) -> Option<DiscountRule> {
            None
        }
    }

    /// Strategy that matches everything at a fixed price.
    struct FixedPrice(Decimal);

    impl PricingStrategy for FixedPrice {
        fn name(&self) -> &str {
            "fixed price"
        }

        fn matches_item(&self, _item: &OrderItem) -> bool {
            true
        }

        fn item_price(&self, _item: &OrderItem) -> Result<Decimal, PricingError> {
            Ok(self.0)
        }
    }

    fn fixed(price: Decimal) -> DiscountRule {
        DiscountRule::ungated(Arc::new(FixedPrice(price)))
    }

    #[test]
    fn undiscounted_items_get_full_price() {
        let calculator = DefaultPriceCalculator::new(Arc::new(StubRepository::empty()));
        let item = OrderItem::new("item-1", 2, dec!(10));

        assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(20));
    }

    #[test]
    fn repository_is_queried_with_the_item_identifier() {
        let repository = Arc::new(StubRepository::empty());
        let calculator = DefaultPriceCalculator::new(Arc::<StubRepository>::clone(&repository));
        let item = OrderItem::new("item-1", 2, dec!(10));

        calculator.item_price(None, &item).unwrap();
        assert_eq!(*repository.queries.lock().unwrap(), vec!["item-1"]);
    }

    #[test]
    fn the_lowest_candidate_price_wins() {
        let repository = StubRepository::with_rules(vec![
            fixed(dec!(1000)),
            fixed(dec!(1)),
            fixed(dec!(2000)),
        ]);
        let calculator = DefaultPriceCalculator::new(Arc::new(repository));
        let item = OrderItem::new("item-1", 2, dec!(50));

        assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(1));
    }

    #[test]
    fn full_price_wins_when_every_discount_is_worse() {
        let repository = StubRepository::with_rules(vec![fixed(dec!(1000))]);
        let calculator = DefaultPriceCalculator::new(Arc::new(repository));
        let item = OrderItem::new("item-1", 2, dec!(50));

        assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(100));
    }

    #[test]
    fn non_matching_rules_are_filtered_before_pricing() {
        let discount =
            crate::pricing::FlatPercentOff::new("other-item", dec!(0.9)).unwrap();
        let repository =
            StubRepository::with_rules(vec![DiscountRule::ungated(Arc::new(discount))]);
        let calculator = DefaultPriceCalculator::new(Arc::new(repository));
        let item = OrderItem::new("item-1", 1, dec!(10));

        // The 90%-off rule targets a different item and must not apply.
        assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(10));
    }

    #[test]
    fn cart_total_sums_item_prices() {
        let repository = StubRepository::with_rules(vec![fixed(dec!(3))]);
        let calculator = DefaultPriceCalculator::new(Arc::new(repository));
        let items = [
            OrderItem::new("item-1", 1, dec!(10)),
            OrderItem::new("item-2", 1, dec!(1)),
        ];

        // item-1 takes the fixed 3, item-2 keeps its full price of 1.
        assert_eq!(calculator.cart_total(None, &items).unwrap(), dec!(4));
    }

    #[test]
    fn cart_total_queries_once_per_item_per_call() {
        let repository = Arc::new(StubRepository::empty());
        let calculator = DefaultPriceCalculator::new(Arc::<StubRepository>::clone(&repository));
        let items = [
            OrderItem::new("item-1", 1, dec!(10)),
            OrderItem::new("item-2", 1, dec!(10)),
        ];

        calculator.cart_total(None, &items).unwrap();
        calculator.cart_total(None, &items).unwrap();
        assert_eq!(repository.queries.lock().unwrap().len(), 4);
    }
}
