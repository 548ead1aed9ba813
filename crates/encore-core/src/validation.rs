//! # Validation Module
//!
//! Input validation run before any shared state is touched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Type validation (numbers, category names)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Seat count must be positive                                       │
//! │  ├── Seating plans must have unique, non-empty seat ids                │
//! │  └── Configured percentages and rates must be in range                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Allocation engine                                            │
//! │  └── "No seats" is an outcome (ABORTED), never an error                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::topology::Room;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates the number of seats requested.
///
/// ## Example
/// ```rust
/// use encore_core::validation::validate_seat_count;
///
/// assert!(validate_seat_count(4).is_ok());
/// assert!(validate_seat_count(0).is_err());
/// ```
pub fn validate_seat_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "seat count".to_string(),
        });
    }

    Ok(())
}

/// Validates a seating plan: every seat id non-empty and unique in the room.
pub fn validate_room(room: &Room) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for seat in room.seats() {
        if seat.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "seat id".to_string(),
            });
        }
        if !seen.insert(seat.id.as_str()) {
            return Err(ValidationError::DuplicateSeat {
                seat_id: seat.id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a discount percentage (0 to 100 inclusive).
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

/// Validates a fractional rate (0 to 1 inclusive).
pub fn validate_fraction(field: &str, rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
