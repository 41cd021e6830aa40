//! Scripted mock collaborators.
//!
//! Each mock records the arguments it was called with behind a `Mutex`, since
//! the collaborator traits take `&self`. Mocks that participate in checkout
//! also append to a shared [`CallLog`] so tests can assert the relative order
//! of calls across collaborators.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use storefront_core::cart::{OrderItem, ShoppingCart};
use storefront_core::checkout::{InventoryService, NotificationService, PaymentService};
use storefront_core::order::PaymentDetails;
use storefront_core::pricing::DiscountRule;
use storefront_core::repository::DiscountRepository;

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Mocks are the only writers; a poisoned lock means a test already panicked.
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Shared, ordered record of collaborator calls.
///
/// Every mock constructed over the same log appends one entry per call, so a
/// test can assert that, say, `notify_customer_order_created` ran before
/// `handout_items_to_delivery`.
#[derive(Default)]
pub struct CallLog {
    entries: Mutex<Vec<String>>,
}

impl CallLog {
    /// Appends an entry.
    pub fn record(&self, entry: impl Into<String>) {
        locked(&self.entries).push(entry.into());
    }

    /// All entries recorded so far, in call order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        locked(&self.entries).clone()
    }
}

/// Inventory mock with a scripted reservation outcome.
pub struct MockInventoryService {
    reserve_result: bool,
    log: Arc<CallLog>,
    reserve_calls: Mutex<Vec<Vec<OrderItem>>>,
    cancel_calls: Mutex<Vec<Vec<OrderItem>>>,
    handout_calls: Mutex<Vec<Vec<OrderItem>>>,
}

impl MockInventoryService {
    /// An inventory that reserves everything it is asked for.
    #[must_use]
    pub fn succeeding(log: Arc<CallLog>) -> Self {
        Self::with_result(true, log)
    }

    /// An inventory that fails every reservation.
    #[must_use]
    pub fn failing(log: Arc<CallLog>) -> Self {
        Self::with_result(false, log)
    }

    fn with_result(reserve_result: bool, log: Arc<CallLog>) -> Self {
        Self {
            reserve_result,
            log,
            reserve_calls: Mutex::new(Vec::new()),
            cancel_calls: Mutex::new(Vec::new()),
            handout_calls: Mutex::new(Vec::new()),
        }
    }

    /// Item slices passed to `reserve_items`, one entry per call.
    #[must_use]
    pub fn reserve_calls(&self) -> Vec<Vec<OrderItem>> {
        locked(&self.reserve_calls).clone()
    }

    /// Item slices passed to `cancel_reservation`, one entry per call.
    #[must_use]
    pub fn cancel_calls(&self) -> Vec<Vec<OrderItem>> {
        locked(&self.cancel_calls).clone()
    }

    /// Item slices passed to `handout_items_to_delivery`, one entry per call.
    #[must_use]
    pub fn handout_calls(&self) -> Vec<Vec<OrderItem>> {
        locked(&self.handout_calls).clone()
    }
}

impl InventoryService for MockInventoryService {
    fn reserve_items(&self, items: &[OrderItem]) -> bool {
        self.log.record("reserve_items");
        locked(&self.reserve_calls).push(items.to_vec());
        self.reserve_result
    }

    fn cancel_reservation(&self, items: &[OrderItem]) {
        self.log.record("cancel_reservation");
        locked(&self.cancel_calls).push(items.to_vec());
    }

    fn handout_items_to_delivery(&self, items: &[OrderItem]) {
        self.log.record("handout_items_to_delivery");
        locked(&self.handout_calls).push(items.to_vec());
    }
}

/// Payment mock with a scripted charge outcome.
pub struct MockPaymentService {
    result: bool,
    log: Arc<CallLog>,
    charges: Mutex<Vec<(PaymentDetails, Decimal)>>,
}

impl MockPaymentService {
    /// A gateway that approves every charge.
    #[must_use]
    pub fn approving(log: Arc<CallLog>) -> Self {
        Self::with_result(true, log)
    }

    /// A gateway that declines every charge.
    #[must_use]
    pub fn declining(log: Arc<CallLog>) -> Self {
        Self::with_result(false, log)
    }

    fn with_result(result: bool, log: Arc<CallLog>) -> Self {
        Self {
            result,
            log,
            charges: Mutex::new(Vec::new()),
        }
    }

    /// The `(details, amount)` pairs passed to `process_payment`.
    #[must_use]
    pub fn charges(&self) -> Vec<(PaymentDetails, Decimal)> {
        locked(&self.charges).clone()
    }
}

impl PaymentService for MockPaymentService {
    fn process_payment(&self, details: &PaymentDetails, amount: Decimal) -> bool {
        self.log.record("process_payment");
        locked(&self.charges).push((details.clone(), amount));
        self.result
    }
}

/// Notification mock that snapshots the carts it was asked to announce.
pub struct MockNotificationService {
    log: Arc<CallLog>,
    notified: Mutex<Vec<(Option<String>, Vec<OrderItem>)>>,
}

impl MockNotificationService {
    /// Creates the mock over the shared log.
    #[must_use]
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            notified: Mutex::new(Vec::new()),
        }
    }

    /// `(customer email, cart items)` snapshots, one per notification.
    #[must_use]
    pub fn notifications(&self) -> Vec<(Option<String>, Vec<OrderItem>)> {
        locked(&self.notified).clone()
    }
}

impl NotificationService for MockNotificationService {
    fn notify_customer_order_created(&self, cart: &ShoppingCart) {
        self.log.record("notify_customer_order_created");
        locked(&self.notified).push((
            cart.customer_email().map(ToString::to_string),
            cart.items().to_vec(),
        ));
    }
}

/// In-memory discount repository backed by hash maps.
#[derive(Default)]
pub struct InMemoryDiscountRepository {
    by_item: HashMap<String, Vec<DiscountRule>>,
    by_code: HashMap<String, DiscountRule>,
}

impl InMemoryDiscountRepository {
    /// An empty repository: every item prices at the calculator's default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule as a candidate for `item_id`.
    #[must_use]
    pub fn with_discount(mut self, item_id: impl Into<String>, rule: DiscountRule) -> Self {
        self.by_item.entry(item_id.into()).or_default().push(rule);
        self
    }

    /// Registers a rule under a promotion code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>, rule: DiscountRule) -> Self {
        self.by_code.insert(code.into(), rule);
        self
    }
}

impl DiscountRepository for InMemoryDiscountRepository {
    fn discounts_for(&self, item_id: &str) -> Vec<DiscountRule> {
        self.by_item.get(item_id).cloned().unwrap_or_default()
    }

    fn discount_for_code(&self, code: &str) -> Option<DiscountRule> {
        self.by_code.get(code).cloned()
    }
}
