//! # Demo Seed Data
//!
//! Seating plans and performances used by the demo and by tests.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────┬──────────┬──────────┐
//! │ Performance  │ Title                                │ Nature   │ Plan     │
//! ├──────────────┼──────────────────────────────────────┼──────────┼──────────┤
//! │ 1            │ The CICD by Corneille                │ PREMIERE │ main hall│
//! │ 2            │ Les fourberies de Scala - Molière    │ PREVIEW  │ main hall│
//! │ 3            │ DOM JSON - Molière                   │ PREMIERE │ studio   │
//! └──────────────┴──────────────────────────────────────┴──────────┴──────────┘
//! ```
//!
//! Performances 1 and 2 each get their own copy of the main hall. Some seats
//! start out booked: other sales channels sell from the same plans.

use chrono::{DateTime, FixedOffset, TimeZone};
use encore_core::{Performance, PerformanceId, PerformanceNature, Room, ZoneBuilder, ZoneCategory};

use crate::error::StoreResult;
use crate::room::RoomStore;

/// 78 seats: 7 standard rows (A to G) and 2 premium rows (H, I), 8 sold.
pub fn main_hall() -> Room {
    Room::new(vec![
        ZoneBuilder::new(ZoneCategory::Standard)
            .row("A", 7)
            .row("B", 8)
            .row("C", 9)
            .row("D", 9)
            .row("E", 10)
            .row("F", 10)
            .row("G", 10)
            .booked(["A1", "A3", "A4", "B2"])
            .build(),
        ZoneBuilder::new(ZoneCategory::Premium)
            .row("H", 7)
            .row("I", 8)
            .booked(["H1", "H3", "H4", "I2"])
            .build(),
    ])
}

/// 14 standard seats in two rows, 4 sold.
pub fn studio() -> Room {
    Room::new(vec![ZoneBuilder::new(ZoneCategory::Standard)
        .row("R1-", 7)
        .row("R2-", 7)
        .booked(["R1-1", "R1-3", "R1-4", "R2-2"])
        .build()])
}

/// Seating plan for each demo performance.
pub fn demo_rooms() -> Vec<(PerformanceId, Room)> {
    vec![(1, main_hall()), (2, main_hall()), (3, studio())]
}

/// Registers every demo seating plan in `rooms`.
pub fn seed_rooms(rooms: &RoomStore) -> StoreResult<()> {
    for (performance_id, room) in demo_rooms() {
        rooms.insert_room(performance_id, room)?;
    }
    Ok(())
}

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .and_then(|offset| offset.with_ymd_and_hms(year, month, day, hour, 0, 0).single())
        .unwrap_or_default()
}

pub fn performance_cicd() -> Performance {
    Performance {
        id: 1,
        title: "The CICD by Corneille".to_string(),
        start_time: utc(2023, 4, 22, 21),
        nature: PerformanceNature::Premiere,
    }
}

pub fn performance_scala() -> Performance {
    Performance {
        id: 2,
        title: "Les fourberies de Scala - Molière".to_string(),
        start_time: utc(2023, 3, 21, 21),
        nature: PerformanceNature::Preview,
    }
}

pub fn performance_json() -> Performance {
    Performance {
        id: 3,
        title: "DOM JSON - Molière".to_string(),
        start_time: utc(2023, 3, 21, 21),
        nature: PerformanceNature::Premiere,
    }
}

pub fn demo_performances() -> Vec<Performance> {
    vec![performance_cicd(), performance_scala(), performance_json()]
}

/// Looks up a demo performance by id.
pub fn demo_performance(id: PerformanceId) -> Option<Performance> {
    demo_performances().into_iter().find(|p| p.id == id)
}

// =============================================================================
// Unit Tests
// =============================================================================
