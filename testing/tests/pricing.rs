//! End-to-end pricing tests: real strategies served by the in-memory
//! repository, priced through the real calculator and cart.

#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::sync::Arc;
use storefront_core::calculator::{DefaultPriceCalculator, PriceCalculator};
use storefront_core::cart::{OrderItem, ShoppingCart};
use storefront_core::customer::{Customer, MembershipLevel};
use storefront_core::pricing::{
    BuyXGetYFree, BuyXGetYPercentOff, DiscountRule, FlatPercentOff, MembershipGate,
    PricingStrategy,
};
use storefront_core::repository::DiscountRepository;
use storefront_testing::mocks::InMemoryDiscountRepository;

fn rule(strategy: impl PricingStrategy + 'static) -> DiscountRule {
    DiscountRule::ungated(Arc::new(strategy))
}

#[test]
fn competing_discounts_yield_the_cheapest_price() {
    // qty 6 at 10: flat 10% = 54, buy-3-get-25%-off = 45, buy-3-get-2-free = 40.
    let repository = InMemoryDiscountRepository::new()
        .with_discount("item-1", rule(FlatPercentOff::new("item-1", dec!(0.1)).unwrap()))
        .with_discount(
            "item-1",
            rule(BuyXGetYPercentOff::new("item-1", 3, dec!(0.25)).unwrap()),
        )
        .with_discount("item-1", rule(BuyXGetYFree::new("item-1", 3, 2).unwrap()));
    let calculator = DefaultPriceCalculator::new(Arc::new(repository));

    let item = OrderItem::new("item-1", 6, dec!(10));
    assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(40));
}

#[test]
fn threshold_discounts_fall_back_to_full_price_below_the_threshold() {
    let repository = InMemoryDiscountRepository::new().with_discount(
        "item-1",
        rule(BuyXGetYPercentOff::new("item-1", 3, dec!(0.25)).unwrap()),
    );
    let calculator = DefaultPriceCalculator::new(Arc::new(repository));

    let item = OrderItem::new("item-1", 2, dec!(10));
    assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(20));
}

#[test]
fn gated_discounts_only_apply_to_eligible_members() {
    let repository = InMemoryDiscountRepository::new().with_discount(
        "item-1",
        DiscountRule::gated(
            Arc::new(FlatPercentOff::new("item-1", dec!(0.5)).unwrap()),
            MembershipGate::at_least(MembershipLevel::Gold),
        ),
    );
    let calculator = DefaultPriceCalculator::new(Arc::new(repository));
    let item = OrderItem::new("item-1", 1, dec!(100));

    let gold = Customer::new("cust-1", "Ada", MembershipLevel::Gold);
    let basic = Customer::new("cust-2", "Bob", MembershipLevel::Basic);

    assert_eq!(calculator.item_price(Some(&gold), &item).unwrap(), dec!(50));
    assert_eq!(calculator.item_price(Some(&basic), &item).unwrap(), dec!(100));
    assert_eq!(calculator.item_price(None, &item).unwrap(), dec!(100));
}

#[test]
fn cart_total_uses_the_customer_context() {
    let repository = InMemoryDiscountRepository::new().with_discount(
        "item-1",
        DiscountRule::gated(
            Arc::new(FlatPercentOff::new("item-1", dec!(0.1)).unwrap()),
            MembershipGate::at_least(MembershipLevel::Silver),
        ),
    );
    let calculator = Arc::new(DefaultPriceCalculator::new(Arc::new(repository)));

    let mut cart = ShoppingCart::new(Arc::clone(&calculator) as Arc<dyn PriceCalculator>)
        .with_customer(Customer::new("cust-1", "Ada", MembershipLevel::Silver));
    cart.add(OrderItem::new("item-1", 1, dec!(100)));
    cart.add(OrderItem::new("item-2", 2, dec!(10)));

    // item-1 discounted to 90, item-2 at full price.
    assert_eq!(cart.total_cost().unwrap(), dec!(110));
}

#[test]
fn promo_codes_resolve_to_their_rule() {
    let repository = InMemoryDiscountRepository::new().with_code(
        "SPRING25",
        rule(FlatPercentOff::new("item-1", dec!(0.25)).unwrap()),
    );

    let rule = repository.discount_for_code("SPRING25").unwrap();
    let item = OrderItem::new("item-1", 2, dec!(10));
    assert!(rule.applies(None, &item));
    assert_eq!(rule.strategy().item_price(&item).unwrap(), dec!(15));

    assert!(repository.discount_for_code("AUTUMN").is_none());
}
