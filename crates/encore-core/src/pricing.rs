//! # Pricing Pipeline
//!
//! Turns the seats a reservation secured into the amount due.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base unit price (catalogue)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per seat: × 1.5 PREMIUM / × 1 STANDARD                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Σ seats ───────────────────────────────► subtotal                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subscribed? × (1 - 17.5 %) ────────────► after_subscription           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  × (1 - voucher rate) ──────────────────► total                         │
//! │                                                                         │
//! │  Nothing is rounded until the total is displayed.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use encore_core::money::{Amount, Rate};
//! use encore_core::pricing::PricingPolicy;
//! use encore_core::topology::ZoneCategory;
//! use encore_core::types::AllocatedSeat;
//! use rust_decimal_macros::dec;
//!
//! let seats: Vec<AllocatedSeat> = ["B3", "B4", "B5", "B6"]
//!     .into_iter()
//!     .map(|id| AllocatedSeat::new(id, ZoneCategory::Standard))
//!     .collect();
//!
//! let bill = PricingPolicy::default().bill(
//!     &seats,
//!     Amount::from_decimal(dec!(35.00)),
//!     true,
//!     Rate::zero(),
//! );
//! assert_eq!(bill.total.to_display(), "115.50");
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::{Amount, Rate};
use crate::topology::ZoneCategory;
use crate::types::AllocatedSeat;
use crate::SUBSCRIBER_DISCOUNT_PERCENT;

/// Premium seats cost one and a half times the base price.
pub const PREMIUM_MULTIPLIER: Decimal = dec!(1.5);

/// Price ratio applied to a seat of `category`.
pub fn category_multiplier(category: ZoneCategory) -> Rate {
    match category {
        ZoneCategory::Standard => Rate::one(),
        ZoneCategory::Premium => Rate::from_decimal(PREMIUM_MULTIPLIER),
    }
}

/// Every stage of a bill, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Sum of per-seat prices.
    pub subtotal: Amount,
    /// Subtotal after the subscriber discount (equal to it otherwise).
    pub after_subscription: Amount,
    /// Amount due.
    pub total: Amount,
}

impl Bill {
    pub const fn empty() -> Self {
        Bill {
            subtotal: Amount::zero(),
            after_subscription: Amount::zero(),
            total: Amount::zero(),
        }
    }
}

/// Discounts applied on top of catalogue prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    subscriber_discount: Rate,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy::with_subscriber_discount_percent(SUBSCRIBER_DISCOUNT_PERCENT)
    }
}

impl PricingPolicy {
    pub fn with_subscriber_discount_percent(percent: Decimal) -> Self {
        PricingPolicy {
            subscriber_discount: Rate::discount_percent(percent),
        }
    }

    /// Factor applied to a subscriber's subtotal (`0.825` by default).
    pub const fn subscriber_discount(&self) -> Rate {
        self.subscriber_discount
    }

    /// Prices `seats` at `base_price`.
    ///
    /// `voucher_rate` is the fraction taken off (`0.20` = 20 % off), already
    /// resolved for the performance; pass [`Rate::zero`] when no voucher
    /// window is open.
    pub fn bill(
        &self,
        seats: &[AllocatedSeat],
        base_price: Amount,
        subscribed: bool,
        voucher_rate: Rate,
    ) -> Bill {
        let subtotal: Amount = seats
            .iter()
            .map(|seat| base_price * category_multiplier(seat.category))
            .sum();

        let after_subscription = if subscribed {
            subtotal * self.subscriber_discount
        } else {
            subtotal
        };

        let total = after_subscription * voucher_rate.complement();

        Bill {
            subtotal,
            after_subscription,
            total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
