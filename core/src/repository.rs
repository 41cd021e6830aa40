//! Discount storage abstraction.
//!
//! The core never owns discount persistence. Whatever backs the store (a
//! database, a campaign service, a fixture) is reached through
//! [`DiscountRepository`] and returns finite, restartable collections, since
//! the calculator iterates them at most twice per pricing call.
//!
//! An in-memory implementation for tests lives in the `storefront-testing`
//! crate.

use crate::pricing::DiscountRule;

/// Supplies candidate discount rules.
///
/// Implementations must be `Send + Sync`; the calculator holds the repository
/// behind an `Arc` and may query it once per item per pricing pass. No caching
/// is mandated by the core.
pub trait DiscountRepository: Send + Sync {
    /// All rules that might apply to the item with this identifier.
    ///
    /// Returning rules that do not actually match the item is fine; the
    /// calculator filters before pricing.
    fn discounts_for(&self, item_id: &str) -> Vec<DiscountRule>;

    /// Looks up a rule by promotion code, used outside checkout proper.
    fn discount_for_code(&self, code: &str) -> Option<DiscountRule>;
}
