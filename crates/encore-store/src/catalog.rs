//! # In-Memory Catalogues
//!
//! Implementations of the pricing collaborators backed by plain maps.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use encore_core::{
    Amount, CustomerId, PerformanceId, PriceCatalog, Rate, SubscriptionRegistry, VoucherProgram,
};

/// Per-performance prices with a fallback for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPriceCatalog {
    prices: HashMap<PerformanceId, Amount>,
    fallback: Amount,
}

impl FixedPriceCatalog {
    pub fn new(fallback: Amount) -> Self {
        FixedPriceCatalog {
            prices: HashMap::new(),
            fallback,
        }
    }

    pub fn with_price(mut self, performance_id: PerformanceId, price: Amount) -> Self {
        self.prices.insert(performance_id, price);
        self
    }
}

impl PriceCatalog for FixedPriceCatalog {
    fn base_price(&self, performance_id: PerformanceId) -> Amount {
        self.prices
            .get(&performance_id)
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// A voucher rate valid strictly before `valid_until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoucherWindow {
    pub rate: Rate,
    pub valid_until: DateTime<Utc>,
}

impl VoucherWindow {
    pub fn new(rate: Rate, valid_until: DateTime<Utc>) -> Self {
        VoucherWindow { rate, valid_until }
    }
}

impl VoucherProgram for VoucherWindow {
    fn voucher_rate(&self, instant: DateTime<Utc>) -> Rate {
        if instant < self.valid_until {
            self.rate
        } else {
            Rate::zero()
        }
    }
}

/// Voucher program that never discounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVoucher;

impl VoucherProgram for NoVoucher {
    fn voucher_rate(&self, _instant: DateTime<Utc>) -> Rate {
        Rate::zero()
    }
}

/// Set of subscribed customers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberList {
    customers: HashSet<CustomerId>,
}

impl SubscriberList {
    pub fn new() -> Self {
        SubscriberList::default()
    }
}

impl FromIterator<CustomerId> for SubscriberList {
    fn from_iter<I: IntoIterator<Item = CustomerId>>(iter: I) -> Self {
        SubscriberList {
            customers: iter.into_iter().collect(),
        }
    }
}

impl SubscriptionRegistry for SubscriberList {
    fn is_subscribed(&self, customer_id: CustomerId) -> bool {
        self.customers.contains(&customer_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
