//! # Collaborator Traits
//!
//! Lookups the pricing pipeline depends on but does not own. The box office
//! wires in concrete implementations (in-memory ones live in
//! `encore-store::catalog`).
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//! │  PriceCatalog        │   │  VoucherProgram      │   │ SubscriptionRegistry │
//! │  performance → price │   │  instant (UTC) → rate│   │ customer → bool      │
//! └──────────────────────┘   └──────────────────────┘   └──────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::money::{Amount, Rate};
use crate::types::{CustomerId, PerformanceId};

/// Base unit price of a seat for a performance.
pub trait PriceCatalog: Send + Sync {
    fn base_price(&self, performance_id: PerformanceId) -> Amount;
}

/// Time-windowed discount rate.
pub trait VoucherProgram: Send + Sync {
    /// Fraction taken off (`0.20` = 20 % off) at `instant`; zero when no
    /// voucher window is open.
    fn voucher_rate(&self, instant: DateTime<Utc>) -> Rate;
}

/// Customer subscription lookup.
pub trait SubscriptionRegistry: Send + Sync {
    fn is_subscribed(&self, customer_id: CustomerId) -> bool;
}
