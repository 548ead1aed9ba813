//! # Seat Allocation Engine
//!
//! Finds a contiguous block of free seats in one row and applies the
//! capacity holdback policy.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request: 4 × STANDARD                                                  │
//! │                                                                         │
//! │  Row A  [■][□][■][■][□][□][□]         streak: 0 1 0 0 1 2 3  ✗         │
//! │  Row B  [□][■][□][□][□][□][□][□]      streak: 1 0 1 2 3 4    ✓ B3..B6  │
//! │  Row C  [□][□][□]...                  counted, never allocated         │
//! │  Zone PREMIUM ...                     counted, category mismatch       │
//! │                                                                         │
//! │  Every seat of every row is visited: total_seats and remaining_seats   │
//! │  are venue-wide, whatever the requested category.                      │
//! │                                                                         │
//! │  Holdback (after the scan):                                            │
//! │    PREMIERE: remaining < ⌊total × 0.5⌋ → withhold                       │
//! │    PREVIEW:  remaining < ⌊total × 0.9⌋ → withhold                       │
//! │    REGULAR:  no threshold                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! [`allocate`] decides and marks seats `BookingPending` on the same
//! `&mut Room`. Callers sharing a room across threads must hold the room's
//! exclusive lock for the whole call (see `encore-store`).

use serde::{Deserialize, Serialize};

use crate::topology::{Room, SeatStatus, ZoneCategory};
use crate::types::{AllocatedSeat, PerformanceNature};

// =============================================================================
// Request & Occupancy
// =============================================================================

/// What the customer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRequest {
    pub count: usize,
    pub category: ZoneCategory,
}

impl SeatRequest {
    pub const fn new(count: usize, category: ZoneCategory) -> Self {
        SeatRequest { count, category }
    }
}

/// Venue-wide seat counters gathered during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Every seat in the room.
    pub total_seats: usize,
    /// Free seats, not counting the block selected by the scan.
    pub remaining_seats: usize,
}

// =============================================================================
// Holdback Policy
// =============================================================================

/// Share of the house that must stay available after an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldbackPolicy {
    keep_percent: usize,
}

impl HoldbackPolicy {
    /// Half the house stays available for VIP processing.
    pub const PREMIERE: HoldbackPolicy = HoldbackPolicy { keep_percent: 50 };
    /// 90 % of the house stays available.
    pub const PREVIEW: HoldbackPolicy = HoldbackPolicy { keep_percent: 90 };

    pub const fn for_nature(nature: PerformanceNature) -> Option<HoldbackPolicy> {
        match nature {
            PerformanceNature::Premiere => Some(Self::PREMIERE),
            PerformanceNature::Preview => Some(Self::PREVIEW),
            PerformanceNature::Regular => None,
        }
    }

    pub const fn keep_percent(&self) -> usize {
        self.keep_percent
    }

    /// `⌊total × keep_percent / 100⌋`, in integers so the floor is exact.
    pub const fn threshold(&self, total_seats: usize) -> usize {
        total_seats * self.keep_percent / 100
    }

    pub const fn permits(&self, occupancy: Occupancy) -> bool {
        occupancy.remaining_seats >= self.threshold(occupancy.total_seats)
    }
}

// =============================================================================
// Scan
// =============================================================================

/// Result of scanning a room without touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScan {
    /// First qualifying block, if any.
    pub block: Option<Vec<AllocatedSeat>>,
    pub occupancy: Occupancy,
}

/// Scans `room` for the first run of `request.count` free seats in a row of
/// the requested category.
///
/// A request for zero seats never yields a block.
pub fn scan(room: &Room, request: &SeatRequest) -> BlockScan {
    let mut total_seats = 0;
    let mut remaining_seats = 0;
    let mut block: Option<Vec<AllocatedSeat>> = None;

    for zone in &room.zones {
        let in_category = zone.category == request.category;

        for row in &zone.rows {
            let mut streak: Vec<&str> = Vec::with_capacity(request.count);

            for seat in &row.seats {
                total_seats += 1;

                if !seat.status.is_free() {
                    streak.clear();
                    continue;
                }

                remaining_seats += 1;

                if !in_category || block.is_some() || request.count == 0 {
                    continue;
                }

                streak.push(seat.id.as_str());
                if streak.len() == request.count {
                    remaining_seats -= streak.len();
                    block = Some(
                        streak
                            .drain(..)
                            .map(|id| AllocatedSeat::new(id, zone.category))
                            .collect(),
                    );
                }
            }
        }
    }

    BlockScan {
        block,
        occupancy: Occupancy {
            total_seats,
            remaining_seats,
        },
    }
}

// =============================================================================
// Decision
// =============================================================================

/// What an allocation attempt produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AllocationOutcome {
    /// Seats secured (and marked pending by [`allocate`]).
    Allocated {
        seats: Vec<AllocatedSeat>,
        occupancy: Occupancy,
    },
    /// No row of the requested category has a long enough free run.
    NoContiguousBlock { occupancy: Occupancy },
    /// A block existed but the holdback policy vetoed it.
    Withheld {
        policy: HoldbackPolicy,
        occupancy: Occupancy,
    },
}

impl AllocationOutcome {
    /// Seats secured, empty unless `Allocated`.
    pub fn seats(&self) -> &[AllocatedSeat] {
        match self {
            AllocationOutcome::Allocated { seats, .. } => seats,
            _ => &[],
        }
    }

    pub fn into_seats(self) -> Vec<AllocatedSeat> {
        match self {
            AllocationOutcome::Allocated { seats, .. } => seats,
            _ => Vec::new(),
        }
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self, AllocationOutcome::Allocated { .. })
    }

    pub fn occupancy(&self) -> Occupancy {
        match self {
            AllocationOutcome::Allocated { occupancy, .. }
            | AllocationOutcome::NoContiguousBlock { occupancy }
            | AllocationOutcome::Withheld { occupancy, .. } => *occupancy,
        }
    }
}

/// Scans and applies the holdback policy, without mutating the room.
pub fn decide(room: &Room, request: &SeatRequest, nature: PerformanceNature) -> AllocationOutcome {
    let BlockScan { block, occupancy } = scan(room, request);

    let Some(seats) = block else {
        return AllocationOutcome::NoContiguousBlock { occupancy };
    };

    match HoldbackPolicy::for_nature(nature) {
        Some(policy) if !policy.permits(occupancy) => {
            AllocationOutcome::Withheld { policy, occupancy }
        }
        _ => AllocationOutcome::Allocated { seats, occupancy },
    }
}

/// Decides and, on success, marks the block `BookingPending` in `room`.
pub fn allocate(
    room: &mut Room,
    request: &SeatRequest,
    nature: PerformanceNature,
) -> AllocationOutcome {
    let outcome = decide(room, request, nature);

    if let AllocationOutcome::Allocated { seats, .. } = &outcome {
        let ids: Vec<&str> = seats.iter().map(|s| s.id.as_str()).collect();
        room.set_status(&ids, SeatStatus::BookingPending);
    }

    outcome
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Row, Seat, Zone, ZoneBuilder};

    fn ids(seats: &[AllocatedSeat]) -> Vec<&str> {
        seats.iter().map(|s| s.id.as_str()).collect()
    }

    /// Row A from the main hall: A1, A3, A4 are sold.
    fn row_a_zone() -> Zone {
        ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 7)
            .booked(["A1", "A3", "A4"])
            .build()
    }

    #[test]
    fn test_broken_row_yields_nothing() {
        let room = Room::new(vec![row_a_zone()]);
        let scan = scan(&room, &SeatRequest::new(4, ZoneCategory::Standard));

        assert!(scan.block.is_none());
        assert_eq!(scan.occupancy.total_seats, 7);
        assert_eq!(scan.occupancy.remaining_seats, 4);
    }

    #[test]
    fn test_scan_continues_to_next_row() {
        let room = Room::new(vec![ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 7)
            .row("B", 8)
            .booked(["A1", "A3", "A4", "B2"])
            .build()]);

        let scan = scan(&room, &SeatRequest::new(4, ZoneCategory::Standard));
        assert_eq!(ids(&scan.block.unwrap()), vec!["B3", "B4", "B5", "B6"]);
        // 15 seats, 4 booked, 4 just selected
        assert_eq!(scan.occupancy.total_seats, 15);
        assert_eq!(scan.occupancy.remaining_seats, 7);
    }

    #[test]
    fn test_first_row_in_requested_category_wins() {
        let room = Room::new(vec![
            ZoneBuilder::new(ZoneCategory::Standard).row("S", 5).build(),
            ZoneBuilder::new(ZoneCategory::Premium)
                .row("H", 3)
                .row("I", 5)
                .build(),
        ]);

        let scan = scan(&room, &SeatRequest::new(4, ZoneCategory::Premium));
        let block = scan.block.unwrap();
        assert_eq!(ids(&block), vec!["I1", "I2", "I3", "I4"]);
        assert!(block.iter().all(|s| s.category == ZoneCategory::Premium));
        // Standard seats still count towards the venue-wide counters
        assert_eq!(scan.occupancy.total_seats, 13);
        assert_eq!(scan.occupancy.remaining_seats, 9);
    }

    #[test]
    fn test_block_never_spans_rows() {
        let room = Room::new(vec![ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 3)
            .row("B", 3)
            .build()]);

        let scan = scan(&room, &SeatRequest::new(4, ZoneCategory::Standard));
        assert!(scan.block.is_none());
        assert_eq!(scan.occupancy.remaining_seats, 6);
    }

    #[test]
    fn test_pending_seats_break_the_streak() {
        let room = Room::new(vec![Zone {
            category: ZoneCategory::Standard,
            rows: vec![Row::new(vec![
                Seat::free("X1"),
                Seat::new("X2", SeatStatus::BookingPending),
                Seat::free("X3"),
                Seat::free("X4"),
            ])],
        }]);

        let scan = scan(&room, &SeatRequest::new(2, ZoneCategory::Standard));
        assert_eq!(ids(&scan.block.unwrap()), vec!["X3", "X4"]);
    }

    #[test]
    fn test_zero_seat_request_never_allocates() {
        let room = Room::new(vec![row_a_zone()]);
        let scan = scan(&room, &SeatRequest::new(0, ZoneCategory::Standard));
        assert!(scan.block.is_none());
    }

    #[test]
    fn test_holdback_thresholds_floor() {
        assert_eq!(HoldbackPolicy::PREMIERE.threshold(15), 7);
        assert_eq!(HoldbackPolicy::PREMIERE.threshold(78), 39);
        assert_eq!(HoldbackPolicy::PREVIEW.threshold(78), 70);
        assert_eq!(HoldbackPolicy::PREVIEW.threshold(14), 12);
    }

    #[test]
    fn test_premiere_holdback_withholds_and_leaves_seats_free() {
        // 15 seats, 10 already sold, 2 contiguous free seats requested
        let mut room = Room::new(vec![ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 5)
            .row("B", 5)
            .row("C", 5)
            .booked(["A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "B5"])
            .build()]);

        let outcome = allocate(
            &mut room,
            &SeatRequest::new(2, ZoneCategory::Standard),
            PerformanceNature::Premiere,
        );

        assert_eq!(
            outcome,
            AllocationOutcome::Withheld {
                policy: HoldbackPolicy::PREMIERE,
                occupancy: Occupancy {
                    total_seats: 15,
                    remaining_seats: 3,
                },
            }
        );
        assert!(outcome.seats().is_empty());
        assert_eq!(room.seat_counts().free, 5);
        assert_eq!(room.seat_counts().pending, 0);
    }

    #[test]
    fn test_regular_performance_has_no_holdback() {
        let mut room = Room::new(vec![ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 3)
            .booked(["A1"])
            .build()]);

        let outcome = allocate(
            &mut room,
            &SeatRequest::new(2, ZoneCategory::Standard),
            PerformanceNature::Regular,
        );

        assert!(outcome.is_allocated());
        assert_eq!(ids(outcome.seats()), vec!["A2", "A3"]);
        assert_eq!(outcome.occupancy().remaining_seats, 0);
    }

    #[test]
    fn test_allocate_marks_block_pending() {
        let mut room = Room::new(vec![ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 7)
            .row("B", 8)
            .booked(["A1", "A3", "A4", "B2"])
            .build()]);

        let outcome = allocate(
            &mut room,
            &SeatRequest::new(4, ZoneCategory::Standard),
            PerformanceNature::Regular,
        );

        assert!(outcome.is_allocated());
        for id in ["B3", "B4", "B5", "B6"] {
            assert_eq!(room.seat(id).unwrap().status, SeatStatus::BookingPending);
        }
        assert_eq!(room.seat("B7").unwrap().status, SeatStatus::Free);
    }

    #[test]
    fn test_no_block_outcome_leaves_room_untouched() {
        let mut room = Room::new(vec![row_a_zone()]);
        let before = room.clone();

        let outcome = allocate(
            &mut room,
            &SeatRequest::new(4, ZoneCategory::Standard),
            PerformanceNature::Regular,
        );

        assert!(matches!(outcome, AllocationOutcome::NoContiguousBlock { .. }));
        assert_eq!(room, before);
    }
}
