//! # Storefront Testing
//!
//! Mock collaborators and test helpers for the Storefront fulfillment core.
//!
//! This crate provides:
//! - Scripted mock implementations of the collaborator traits
//!   (`InventoryService`, `PaymentService`, `NotificationService`,
//!   `DiscountRepository`)
//! - A shared [`CallLog`] for asserting cross-collaborator call ordering
//! - Builders for common test fixtures
//!
//! The integration suites for the core live under `tests/` in this crate, so
//! they can exercise the real orchestrator against these mocks.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_core::checkout::OrderProcessor;
//! use storefront_testing::mocks::{
//!     CallLog, MockInventoryService, MockNotificationService, MockPaymentService,
//! };
//!
//! let log = Arc::new(CallLog::default());
//! let inventory = Arc::new(MockInventoryService::succeeding(Arc::clone(&log)));
//! let payment = Arc::new(MockPaymentService::approving(Arc::clone(&log)));
//! let notification = Arc::new(MockNotificationService::new(Arc::clone(&log)));
//!
//! let processor = OrderProcessor::new(inventory, payment, notification);
//! ```

pub mod mocks;

pub use mocks::{
    CallLog, InMemoryDiscountRepository, MockInventoryService, MockNotificationService,
    MockPaymentService,
};

/// Fixture builders shared by the integration suites.
pub mod fixtures {
    use chrono::{TimeZone, Utc};
    use storefront_core::order::{PaymentDetails, PaymentMethod};

    /// Payment details that look plausible and parse nowhere.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn payment_details() -> PaymentDetails {
        PaymentDetails {
            method: PaymentMethod::CreditCard,
            card_number: "4111 1111 1111 1111".to_string(),
            expiry: Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
            holder_name: "Sample User".to_string(),
        }
    }
}
