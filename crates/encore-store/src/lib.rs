//! # encore-store: Shared State for Encore Box Office
//!
//! In-memory, thread-safe stores for seating plans and reservations, plus the
//! in-memory catalogues the pricing pipeline looks things up in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Encore Box Office Data Flow                         │
//! │                                                                         │
//! │  TheaterService::reserve                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  encore-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │  RoomStore    │    │ ReservationStore │   │  catalogs   │  │   │
//! │  │   │  (room.rs)    │    │ (reservation.rs) │   │ (catalog.rs)│  │   │
//! │  │   │               │    │                  │   │             │  │   │
//! │  │   │ RwLock per    │    │ Mutex id counter │   │ prices      │  │   │
//! │  │   │ performance   │    │ RwLock table     │   │ vouchers    │  │   │
//! │  │   │ find+reserve  │    │                  │   │ subscribers │  │   │
//! │  │   └───────┬───────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  encore-core::allocation (pure engine, run under the room lock)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`room`] - Seating plans and atomic find-and-reserve
//! - [`reservation`] - Reservation table and id sequence
//! - [`catalog`] - In-memory price, voucher and subscription lookups
//! - [`seed`] - Demo seating plans and performances
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod reservation;
pub mod room;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{FixedPriceCatalog, NoVoucher, SubscriberList, VoucherWindow};
pub use error::{StoreError, StoreResult};
pub use reservation::ReservationStore;
pub use room::RoomStore;
