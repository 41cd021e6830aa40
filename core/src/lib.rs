//! # Storefront Core
//!
//! In-process order-fulfillment engine for an online store.
//!
//! This crate provides the two tightly-coupled subsystems at the heart of
//! fulfillment:
//!
//! - **Discount pricing engine**: given a line item and a set of competing
//!   discount rules, compute the cheapest applicable price
//!   ([`calculator::DefaultPriceCalculator`]).
//! - **Checkout orchestrator**: drive inventory reservation, payment capture,
//!   and customer notification in strict order, compensating prior effects when
//!   a later step fails ([`checkout::OrderProcessor`]).
//!
//! Inventory, payment, notification, and discount storage are external
//! collaborators. The core only sees them through the narrow traits in
//! [`checkout`] and [`repository`], injected as `Arc<dyn …>` constructor
//! dependencies. Mock implementations live in the `storefront-testing` crate.
//!
//! ## Concurrency
//!
//! The core is single-threaded and synchronous: each checkout runs its steps to
//! completion on the caller's thread. Carts and orders are not thread-safe by
//! design; callers serialize access externally, one [`order::Order`] per
//! logical checkout attempt.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront_core::calculator::DefaultPriceCalculator;
//! use storefront_core::cart::{OrderItem, ShoppingCart};
//! use storefront_core::checkout::OrderProcessor;
//! use storefront_core::order::{Order, PaymentDetails};
//!
//! let calculator = Arc::new(DefaultPriceCalculator::new(repository));
//! let mut cart = ShoppingCart::new(calculator);
//! cart.add(OrderItem::new("sku-42", 3, dec!(19.99)));
//!
//! let mut order = Order::new(cart, payment_details);
//! let processor = OrderProcessor::new(inventory, payment, notification);
//! processor.checkout(&mut order)?;
//! ```

// Re-export the money type used across all pricing interfaces
pub use rust_decimal::Decimal;

pub mod calculator;
pub mod cart;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod order;
pub mod pricing;
pub mod repository;

pub use calculator::{DefaultPriceCalculator, PriceCalculator};
pub use cart::{OrderItem, Product, ShoppingCart};
pub use checkout::{InventoryService, NotificationService, OrderProcessor, PaymentService};
pub use customer::{Customer, MembershipLevel};
pub use error::{CheckoutError, ConfigError, OrderFailure, PricingError};
pub use order::{Order, OrderState, PaymentDetails, PaymentMethod};
pub use pricing::{
    BuyXGetYFree, BuyXGetYPercentOff, DiscountRule, FlatPercentOff, FullPrice, MembershipGate,
    PricingStrategy,
};
pub use repository::DiscountRepository;
