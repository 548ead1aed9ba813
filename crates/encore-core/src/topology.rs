//! # Venue Topology
//!
//! Rooms, zones, rows and seats for a single performance.
//!
//! ## Shape of a Room
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Room (one per performance)                                             │
//! │                                                                         │
//! │  Zone STANDARD                                                          │
//! │    Row 0:  [A1 ■] [A2 □] [A3 ■] [A4 ■] [A5 □] [A6 □] [A7 □]            │
//! │    Row 1:  [B1 □] [B2 ■] [B3 □] [B4 □] [B5 □] [B6 □] [B7 □] [B8 □]     │
//! │    ...                                                                  │
//! │  Zone PREMIUM                                                           │
//! │    Row 0:  [H1 ■] [H2 □] ...                                           │
//! │                                                                         │
//! │  □ Free   ■ Booked   ◧ BookingPending                                  │
//! │                                                                         │
//! │  ORDER IS SIGNIFICANT: zones, then rows, then seats left to right.     │
//! │  Seat adjacency is position within a row; rows never join.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Seat Status
// =============================================================================

/// Availability of a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Open for allocation.
    #[default]
    Free,
    /// Sold (possibly by another sales channel).
    Booked,
    /// Allocated to a reservation that is not confirmed yet.
    BookingPending,
}

impl SeatStatus {
    /// Returns true if the seat can join a contiguous block.
    #[inline]
    pub const fn is_free(&self) -> bool {
        matches!(self, SeatStatus::Free)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Free => "FREE",
            SeatStatus::Booked => "BOOKED",
            SeatStatus::BookingPending => "BOOKING_PENDING",
        }
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Zone Category
// =============================================================================

/// Pricing category of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCategory {
    #[default]
    Standard,
    Premium,
}

impl ZoneCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ZoneCategory::Standard => "STANDARD",
            ZoneCategory::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ZoneCategory::Standard),
            "premium" => Ok(ZoneCategory::Premium),
            other => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}', expected standard or premium", other),
            }),
        }
    }
}

// =============================================================================
// Seat / Row / Zone / Room
// =============================================================================

/// A single seat. Identity is `id`, unique within a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(id: impl Into<String>, status: SeatStatus) -> Self {
        Seat {
            id: id.into(),
            status,
        }
    }

    pub fn free(id: impl Into<String>) -> Self {
        Seat::new(id, SeatStatus::Free)
    }
}

/// An ordered run of seats. Order defines adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub seats: Vec<Seat>,
}

impl Row {
    pub fn new(seats: Vec<Seat>) -> Self {
        Row { seats }
    }
}

/// A block of rows sharing one pricing category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub category: ZoneCategory,
    pub rows: Vec<Row>,
}

/// Summary of seat availability in a room.
///
/// `free + booked + pending` never changes for a given room: seats are
/// neither created nor destroyed by reserving or cancelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCounts {
    pub free: usize,
    pub booked: usize,
    pub pending: usize,
}

impl SeatCounts {
    #[inline]
    pub const fn total(&self) -> usize {
        self.free + self.booked + self.pending
    }
}

/// The seating plan of one performance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub zones: Vec<Zone>,
}

impl Room {
    pub fn new(zones: Vec<Zone>) -> Self {
        Room { zones }
    }

    /// Iterates over every seat in room order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.zones
            .iter()
            .flat_map(|zone| zone.rows.iter())
            .flat_map(|row| row.seats.iter())
    }

    /// Looks up a seat by id.
    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats().find(|seat| seat.id == seat_id)
    }

    pub fn seat_counts(&self) -> SeatCounts {
        self.seats().fold(SeatCounts::default(), |mut counts, seat| {
            match seat.status {
                SeatStatus::Free => counts.free += 1,
                SeatStatus::Booked => counts.booked += 1,
                SeatStatus::BookingPending => counts.pending += 1,
            }
            counts
        })
    }

    /// Applies `status` to every seat whose id is in `seat_ids`.
    ///
    /// Ids that match no seat are ignored. Returns the number of seats
    /// touched.
    pub fn set_status<S: AsRef<str>>(&mut self, seat_ids: &[S], status: SeatStatus) -> usize {
        let wanted: HashSet<&str> = seat_ids.iter().map(AsRef::as_ref).collect();
        let mut touched = 0;

        for seat in self
            .zones
            .iter_mut()
            .flat_map(|zone| zone.rows.iter_mut())
            .flat_map(|row| row.seats.iter_mut())
        {
            if wanted.contains(seat.id.as_str()) {
                seat.status = status;
                touched += 1;
            }
        }

        touched
    }
}

// =============================================================================
// Zone Builder
// =============================================================================

/// Test-data style builder for zones.
///
/// ## Example
/// ```rust
/// use encore_core::topology::{SeatStatus, ZoneBuilder, ZoneCategory};
///
/// let zone = ZoneBuilder::new(ZoneCategory::Standard)
///     .row("A", 7)
///     .row("B", 8)
///     .booked(["A1", "A3", "A4", "B2"])
///     .build();
///
/// assert_eq!(zone.rows[0].seats[0].id, "A1");
/// assert_eq!(zone.rows[0].seats[0].status, SeatStatus::Booked);
/// assert_eq!(zone.rows[1].seats.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ZoneBuilder {
    category: ZoneCategory,
    rows: Vec<Row>,
    booked: HashSet<String>,
}

impl ZoneBuilder {
    pub fn new(category: ZoneCategory) -> Self {
        ZoneBuilder {
            category,
            rows: Vec::new(),
            booked: HashSet::new(),
        }
    }

    /// Adds a row of `count` seats named `{prefix}1..={prefix}{count}`.
    pub fn row(mut self, prefix: &str, count: usize) -> Self {
        let seats = (1..=count)
            .map(|n| Seat::free(format!("{}{}", prefix, n)))
            .collect();
        self.rows.push(Row::new(seats));
        self
    }

    /// Marks seats as already sold by another channel.
    pub fn booked<I, S>(mut self, seat_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.booked.extend(seat_ids.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Zone {
        let booked = self.booked;
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                Row::new(
                    row.seats
                        .into_iter()
                        .map(|seat| {
                            let status = if booked.contains(&seat.id) {
                                SeatStatus::Booked
                            } else {
                                seat.status
                            };
                            Seat::new(seat.id, status)
                        })
                        .collect(),
                )
            })
            .collect();

        Zone {
            category: self.category,
            rows,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_room() -> Room {
        Room::new(vec![
            ZoneBuilder::new(ZoneCategory::Standard)
                .row("A", 4)
                .row("B", 3)
                .booked(["A2"])
                .build(),
            ZoneBuilder::new(ZoneCategory::Premium)
                .row("P", 2)
                .build(),
        ])
    }

    #[test]
    fn test_seats_iterate_in_room_order() {
        let room = sample_room();
        let ids: Vec<&str> = room.seats().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3", "A4", "B1", "B2", "B3", "P1", "P2"]);
    }

    #[test]
    fn test_seat_counts() {
        let room = sample_room();
        let counts = room.seat_counts();
        assert_eq!(counts.free, 8);
        assert_eq!(counts.booked, 1);
        assert_eq!(counts.pending, 0);
        assert_eq!(counts.total(), 9);
    }

    #[test]
    fn test_set_status_touches_matching_seats_across_zones() {
        let mut room = sample_room();
        let touched = room.set_status(&["A3", "P2", "NOPE"], SeatStatus::BookingPending);

        assert_eq!(touched, 2);
        assert_eq!(room.seat("A3").unwrap().status, SeatStatus::BookingPending);
        assert_eq!(room.seat("P2").unwrap().status, SeatStatus::BookingPending);
        assert_eq!(room.seat("A4").unwrap().status, SeatStatus::Free);
    }

    #[test]
    fn test_set_status_with_unknown_ids_is_noop() {
        let mut room = sample_room();
        let before = room.clone();
        assert_eq!(room.set_status(&["Z9"], SeatStatus::Booked), 0);
        assert_eq!(room, before);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Premium".parse::<ZoneCategory>(), Ok(ZoneCategory::Premium));
        assert_eq!(" standard ".parse::<ZoneCategory>(), Ok(ZoneCategory::Standard));
        assert!("balcony".parse::<ZoneCategory>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SeatStatus::BookingPending.to_string(), "BOOKING_PENDING");
        assert_eq!(ZoneCategory::Premium.to_string(), "PREMIUM");
    }
}
