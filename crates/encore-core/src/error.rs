//! # Error Types
//!
//! Domain-specific error types for encore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  encore-core errors (this file)                                        │
//! │  ├── CoreError        - Reservation lifecycle violations               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  encore-store errors (separate crate)                                  │
//! │  └── StoreError       - Missing rooms, poisoned locks                  │
//! │                                                                         │
//! │  box-office errors (in app)                                            │
//! │  └── ServiceError     - What the orchestrator reports                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → CLI exit status     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Running out of seats is a normal outcome: the reservation is recorded as
//! `Aborted`. Only malformed input and impossible state transitions are
//! errors here.

use thiserror::Error;

use crate::types::{ReservationId, ReservationStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A reservation was asked to move to a state its lifecycle forbids.
    ///
    /// ## When This Occurs
    /// - Re-opening a cancelled reservation (`Cancelled → Pending`)
    /// - Turning an aborted reservation into a pending one
    ///
    /// Reservations are created `Pending` or `Aborted`; the only transition
    /// afterwards is to `Cancelled`.
    #[error("Reservation {reservation_id} cannot move from {from} to {to}")]
    InvalidTransition {
        reservation_id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any seat is touched, so a rejected request leaves the
/// venue exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (e.g. malformed decimal, unknown category).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A seat id appears more than once in a seating plan.
    #[error("seat '{seat_id}' appears more than once in the room")]
    DuplicateSeat { seat_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            reservation_id: 123456,
            from: ReservationStatus::Cancelled,
            to: ReservationStatus::Pending,
        };
        assert_eq!(
            err.to_string(),
            "Reservation 123456 cannot move from CANCELLED to PENDING"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "seat count".to_string(),
        };
        assert_eq!(err.to_string(), "seat count must be positive");

        let err = ValidationError::DuplicateSeat {
            seat_id: "A1".to_string(),
        };
        assert_eq!(err.to_string(), "seat 'A1' appears more than once in the room");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "seat id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
