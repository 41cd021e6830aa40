//! Customer identity and membership tiers.
//!
//! Customers are read-only inputs to discount matching. A cart may carry no
//! customer at all (anonymous checkout), in which case membership-gated
//! discounts never apply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership tier used to gate per-customer discounts.
///
/// Tiers are ordered: `Basic < Silver < Gold`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MembershipLevel {
    /// Entry tier, no special standing.
    Basic,
    /// Mid tier.
    Silver,
    /// Top tier.
    Gold,
}

impl fmt::Display for MembershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "Basic"),
            Self::Silver => write!(f, "Silver"),
            Self::Gold => write!(f, "Gold"),
        }
    }
}

/// A known customer, as seen by the pricing engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Company the customer belongs to, if any.
    pub company: Option<String>,
    /// Membership tier for discount eligibility.
    pub level: MembershipLevel,
}

impl Customer {
    /// Creates a customer at the given membership tier.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: MembershipLevel) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company: None,
            level,
        }
    }

    /// Sets the customer's company.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_levels_are_ordered() {
        assert!(MembershipLevel::Basic < MembershipLevel::Silver);
        assert!(MembershipLevel::Silver < MembershipLevel::Gold);
    }

    #[test]
    fn customer_builder_sets_company() {
        let customer =
            Customer::new("cust-1", "Ada", MembershipLevel::Gold).with_company("Initech");
        assert_eq!(customer.company.as_deref(), Some("Initech"));
    }
}
