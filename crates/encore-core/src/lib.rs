//! # encore-core: Pure Business Logic for Encore Box Office
//!
//! This crate is the **heart** of the box office. It contains the seat
//! allocation engine, the reservation lifecycle and the pricing pipeline as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Encore Box Office Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    box-office (CLI + orchestrator)              │   │
//! │  │        reserve ──► cancel ──► find_reservation ──► render      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          encore-store (RwLock rooms, reservation table)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ encore-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────────┐   │   │
//! │  │   │  money   │ │ topology │ │ allocation │ │   pricing    │   │   │
//! │  │   │  Amount  │ │ Room     │ │ scan       │ │ PricingPolicy│   │   │
//! │  │   │  Rate    │ │ Zone     │ │ holdback   │ │ Bill         │   │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Amount` and `Rate`
//! - [`topology`] - Rooms, zones, rows, seats
//! - [`types`] - Performances and reservations
//! - [`allocation`] - Contiguous block search and holdback policy
//! - [`pricing`] - Category, subscription and voucher pipeline
//! - [`catalog`] - Traits for the external lookups
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod topology;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::{AllocationOutcome, HoldbackPolicy, Occupancy, SeatRequest};
pub use catalog::{PriceCatalog, SubscriptionRegistry, VoucherProgram};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Amount, Rate};
pub use pricing::{Bill, PricingPolicy};
pub use topology::{Room, Row, Seat, SeatCounts, SeatStatus, Zone, ZoneBuilder, ZoneCategory};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reservation ids start just above this value.
pub const DEFAULT_RESERVATION_ID_FLOOR: ReservationId = 123_455;

/// Discount granted to subscribed customers, in percent.
pub const SUBSCRIBER_DISCOUNT_PERCENT: Decimal = dec!(17.5);
