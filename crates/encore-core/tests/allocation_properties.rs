//! Property tests for the allocation engine and the pricing pipeline.

use encore_core::allocation::{allocate, scan};
use encore_core::money::{Amount, Rate};
use encore_core::pricing::PricingPolicy;
use encore_core::topology::{Row, Seat, SeatStatus, Zone};
use encore_core::types::{AllocatedSeat, PerformanceNature};
use encore_core::{Room, SeatRequest, ZoneCategory};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Strategies
// =============================================================================

fn arb_status() -> impl Strategy<Value = SeatStatus> {
    prop_oneof![
        3 => Just(SeatStatus::Free),
        1 => Just(SeatStatus::Booked),
        1 => Just(SeatStatus::BookingPending),
    ]
}

fn arb_category() -> impl Strategy<Value = ZoneCategory> {
    prop_oneof![Just(ZoneCategory::Standard), Just(ZoneCategory::Premium)]
}

fn arb_nature() -> impl Strategy<Value = PerformanceNature> {
    prop_oneof![
        Just(PerformanceNature::Preview),
        Just(PerformanceNature::Premiere),
        Just(PerformanceNature::Regular),
    ]
}

/// Rooms of up to 3 zones × 4 rows × 10 seats with unique `Z{z}R{r}S{s}` ids.
fn arb_room() -> impl Strategy<Value = Room> {
    let row = prop::collection::vec(arb_status(), 1..10);
    let zone = (arb_category(), prop::collection::vec(row, 1..4));

    prop::collection::vec(zone, 1..3).prop_map(|zones| {
        Room::new(
            zones
                .into_iter()
                .enumerate()
                .map(|(z, (category, rows))| Zone {
                    category,
                    rows: rows
                        .into_iter()
                        .enumerate()
                        .map(|(r, statuses)| {
                            Row::new(
                                statuses
                                    .into_iter()
                                    .enumerate()
                                    .map(|(s, status)| {
                                        Seat::new(format!("Z{}R{}S{}", z, r, s), status)
                                    })
                                    .collect(),
                            )
                        })
                        .collect(),
                })
                .collect(),
        )
    })
}

/// Position of every seat: (zone, row, index in row).
fn positions(room: &Room) -> Vec<(String, usize, usize, usize)> {
    let mut out = Vec::new();
    for (z, zone) in room.zones.iter().enumerate() {
        for (r, row) in zone.rows.iter().enumerate() {
            for (i, seat) in row.seats.iter().enumerate() {
                out.push((seat.id.clone(), z, r, i));
            }
        }
    }
    out
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn allocation_conserves_seats(
        room in arb_room(),
        count in 1usize..6,
        category in arb_category(),
        nature in arb_nature(),
    ) {
        let before = room.seat_counts();
        let mut room = room;
        let outcome = allocate(&mut room, &SeatRequest::new(count, category), nature);
        let after = room.seat_counts();

        prop_assert_eq!(before.total(), after.total());
        prop_assert_eq!(after.free + outcome.seats().len(), before.free);
        prop_assert_eq!(after.pending, before.pending + outcome.seats().len());
    }

    #[test]
    fn allocated_block_is_one_row_and_exact_length(
        room in arb_room(),
        count in 1usize..6,
        category in arb_category(),
    ) {
        let mut room = room;
        let initial = room.clone();
        let outcome = allocate(
            &mut room,
            &SeatRequest::new(count, category),
            PerformanceNature::Regular,
        );

        if let Some(seats) = outcome.is_allocated().then(|| outcome.seats()) {
            prop_assert_eq!(seats.len(), count);

            let where_is = positions(&initial);
            let located: Vec<_> = seats
                .iter()
                .map(|seat| where_is.iter().find(|(id, ..)| *id == seat.id).cloned())
                .collect::<Option<Vec<_>>>()
                .unwrap();

            let (_, zone, row, first) = located[0].clone();
            for (offset, (_, z, r, i)) in located.iter().enumerate() {
                prop_assert_eq!(*z, zone);
                prop_assert_eq!(*r, row);
                prop_assert_eq!(*i, first + offset);
            }

            prop_assert_eq!(initial.zones[zone].category, category);
            for seat in seats {
                prop_assert_eq!(seat.category, category);
                prop_assert_eq!(initial.seat(&seat.id).unwrap().status, SeatStatus::Free);
            }
        }
    }

    #[test]
    fn scan_counts_every_seat(room in arb_room(), count in 1usize..6, category in arb_category()) {
        let counts = room.seat_counts();
        let result = scan(&room, &SeatRequest::new(count, category));
        let taken = result.block.as_ref().map_or(0, Vec::len);

        prop_assert_eq!(result.occupancy.total_seats, counts.total());
        prop_assert_eq!(result.occupancy.remaining_seats + taken, counts.free);
    }

    #[test]
    fn withheld_requests_leave_room_untouched(room in arb_room(), count in 1usize..6) {
        let mut room = room;
        let before = room.clone();
        let outcome = allocate(
            &mut room,
            &SeatRequest::new(count, ZoneCategory::Standard),
            PerformanceNature::Preview,
        );

        if !outcome.is_allocated() {
            prop_assert_eq!(room, before);
        }
    }

    #[test]
    fn standard_subtotal_is_linear(cents in 0i64..100_000, count in 0usize..20) {
        let base = Amount::from_decimal(Decimal::new(cents, 2));
        let seats = |n: usize| -> Vec<AllocatedSeat> {
            (0..n)
                .map(|i| AllocatedSeat::new(format!("S{}", i), ZoneCategory::Standard))
                .collect()
        };
        let policy = PricingPolicy::default();

        let single = policy.bill(&seats(count), base, false, Rate::zero());
        let double = policy.bill(&seats(count * 2), base, false, Rate::zero());

        prop_assert_eq!(double.subtotal, single.subtotal + single.subtotal);
    }
}
