//! # Domain Types
//!
//! Performances, reservations and the seats a reservation secures.
//!
//! ## Reservation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reservation State Machine                           │
//! │                                                                         │
//! │   reserve() ──┬── seats secured ────► PENDING ───┐                     │
//! │               │                                  │ cancel()            │
//! │               └── nothing secured ──► ABORTED ───┼──────► CANCELLED     │
//! │                                                  │          │          │
//! │                                                  │          └─ cancel()│
//! │                                                  │             (no-op) │
//! │                                                                         │
//! │   Reservations are never deleted. CANCELLED is terminal.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::topology::ZoneCategory;

// =============================================================================
// Identifiers
// =============================================================================

pub type PerformanceId = i64;
pub type ReservationId = i64;
pub type CustomerId = i64;

// =============================================================================
// Performance
// =============================================================================

/// Kind of performance; drives the capacity holdback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceNature {
    /// Early showing; 90 % of the house is held back.
    Preview,
    /// Opening night; half the house is held back for VIPs.
    Premiere,
    /// Ordinary run, no holdback.
    #[default]
    Regular,
}

impl PerformanceNature {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PerformanceNature::Preview => "PREVIEW",
            PerformanceNature::Premiere => "PREMIERE",
            PerformanceNature::Regular => "REGULAR",
        }
    }
}

impl fmt::Display for PerformanceNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled showing of a play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub id: PerformanceId,
    /// Name of the play, e.g. "The CICD by Corneille".
    pub title: String,
    /// Curtain time in the venue's local offset.
    pub start_time: DateTime<FixedOffset>,
    pub nature: PerformanceNature,
}

impl Performance {
    /// Start time expressed in UTC (the voucher program is keyed on it).
    #[inline]
    pub fn start_time_utc(&self) -> DateTime<Utc> {
        self.start_time.with_timezone(&Utc)
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Seats are held `BookingPending`.
    Pending,
    /// No seats could be secured.
    Aborted,
    /// Explicitly cancelled; seats returned to the pool.
    Cancelled,
}

impl ReservationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Aborted => "ABORTED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    /// Returns true if the lifecycle allows moving from `self` to `next`.
    pub const fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(next, ReservationStatus::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seat secured by a reservation, with the category of its zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllocatedSeat {
    pub id: String,
    pub category: ZoneCategory,
}

impl AllocatedSeat {
    pub fn new(id: impl Into<String>, category: ZoneCategory) -> Self {
        AllocatedSeat {
            id: id.into(),
            category,
        }
    }
}

/// A customer's request for seats, as recorded in the reservation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub performance_id: PerformanceId,
    pub status: ReservationStatus,
    /// Seat ids held by this reservation, in room order.
    pub seats: Vec<String>,
}

impl Reservation {
    /// A reservation holding `seats`.
    pub fn pending(id: ReservationId, performance_id: PerformanceId, seats: Vec<String>) -> Self {
        Reservation {
            id,
            performance_id,
            status: ReservationStatus::Pending,
            seats,
        }
    }

    /// A reservation that secured nothing.
    pub fn aborted(id: ReservationId, performance_id: PerformanceId) -> Self {
        Reservation {
            id,
            performance_id,
            status: ReservationStatus::Aborted,
            seats: Vec::new(),
        }
    }

    /// Returns true while the reservation holds seats.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Pending
    }

    /// Moves the reservation to `next`, enforcing the lifecycle.
    pub fn transition_to(&mut self, next: ReservationStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                reservation_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Cancels the reservation and forgets its seats.
    ///
    /// Cancelling twice is allowed and changes nothing the second time.
    /// Returns the seat ids the reservation was holding.
    pub fn cancel(&mut self) -> CoreResult<Vec<String>> {
        self.transition_to(ReservationStatus::Cancelled)?;
        Ok(std::mem::take(&mut self.seats))
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation{{id={}, status={}, seats={:?}}}",
            self.id, self.status, self.seats
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
