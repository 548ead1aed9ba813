//! # Store Error Types
//!
//! Error types for the shared-state layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  PoisonError / ValidationError                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the performance or lock involved      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (box office) ← Unknown performance becomes ABORTED       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use encore_core::{PerformanceId, ReservationId, ValidationError};
use thiserror::Error;

/// Shared-state operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No seating plan registered for the performance.
    #[error("Performance not found: {0}")]
    PerformanceNotFound(PerformanceId),

    /// The id sequence has no value left above the last one handed out.
    #[error("Reservation ids exhausted after {0}")]
    IdsExhausted(ReservationId),

    /// A thread panicked while holding a lock.
    ///
    /// ## When This Occurs
    /// - A closure passed to `ReservationStore::update` panicked
    /// - Any other panic inside a critical section
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    /// The seating plan failed validation.
    #[error("Invalid seating plan for performance {performance_id}: {source}")]
    InvalidTopology {
        performance_id: PerformanceId,
        #[source]
        source: ValidationError,
    },
}

impl StoreError {
    pub(crate) fn poisoned<T>(what: &'static str) -> impl FnOnce(T) -> StoreError {
        move |_| StoreError::LockPoisoned(what)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
