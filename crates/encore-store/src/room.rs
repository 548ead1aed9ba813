//! # Room Store
//!
//! Seating plans keyed by performance, each behind its own lock.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RwLock<HashMap<PerformanceId, Arc<RwLock<Room>>>>                      │
//! │     │   write-locked only by insert_room                                │
//! │     │                                                                   │
//! │     ├── 1 ──► RwLock<Room>   get / seat_counts   → read lock (shared)  │
//! │     ├── 2 ──► RwLock<Room>   allocate            → write lock          │
//! │     └── 3 ──► RwLock<Room>   set_seat_status     → write lock          │
//! │                                                                         │
//! │  allocate holds ONE write lock across scan + holdback + pending mark:  │
//! │  two requests for the same performance can never pick the same seats.  │
//! │  Performances never contend with each other.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use encore_core::allocation::{self, AllocationOutcome, SeatRequest};
use encore_core::validation::validate_room;
use encore_core::{PerformanceId, PerformanceNature, Room, SeatCounts, SeatStatus};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

type RoomHandle = Arc<RwLock<Room>>;

/// Concurrency-safe store of seating plans.
///
/// ## Usage
/// ```rust
/// use encore_core::{PerformanceNature, SeatRequest, ZoneCategory};
/// use encore_store::{seed, RoomStore};
///
/// let rooms = RoomStore::new();
/// rooms.insert_room(1, seed::main_hall()).unwrap();
///
/// let outcome = rooms
///     .allocate(1, &SeatRequest::new(4, ZoneCategory::Standard), PerformanceNature::Premiere)
///     .unwrap();
/// assert_eq!(outcome.seats().len(), 4);
/// ```
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: RwLock<HashMap<PerformanceId, RoomHandle>>,
}

impl RoomStore {
    pub fn new() -> Self {
        RoomStore::default()
    }

    /// Registers (or replaces) the seating plan of a performance.
    pub fn insert_room(&self, performance_id: PerformanceId, room: Room) -> StoreResult<()> {
        validate_room(&room).map_err(|source| StoreError::InvalidTopology {
            performance_id,
            source,
        })?;

        let seats = room.seat_counts();
        self.rooms
            .write()
            .map_err(StoreError::poisoned("rooms"))?
            .insert(performance_id, Arc::new(RwLock::new(room)));

        debug!(
            performance_id,
            total = seats.total(),
            free = seats.free,
            "Registered seating plan"
        );
        Ok(())
    }

    /// Ids of every performance with a seating plan, ascending.
    pub fn performance_ids(&self) -> StoreResult<Vec<PerformanceId>> {
        let mut ids: Vec<_> = self
            .rooms
            .read()
            .map_err(StoreError::poisoned("rooms"))?
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Returns an independent copy of the room; later changes to the store
    /// do not show through it.
    pub fn get(&self, performance_id: PerformanceId) -> StoreResult<Option<Room>> {
        let Some(handle) = self.handle(performance_id)? else {
            return Ok(None);
        };
        let room = handle.read().map_err(StoreError::poisoned("room"))?;
        Ok(Some(room.clone()))
    }

    /// Sets `status` on every seat of the performance whose id is listed.
    ///
    /// Unknown performances and unknown seat ids are ignored. Returns the
    /// number of seats touched.
    pub fn set_seat_status<S: AsRef<str>>(
        &self,
        performance_id: PerformanceId,
        seat_ids: &[S],
        status: SeatStatus,
    ) -> StoreResult<usize> {
        let Some(handle) = self.handle(performance_id)? else {
            debug!(performance_id, "No seating plan, status update ignored");
            return Ok(0);
        };

        let mut room = handle.write().map_err(StoreError::poisoned("room"))?;
        let touched = room.set_status(seat_ids, status);

        debug!(performance_id, %status, touched, "Updated seat status");
        Ok(touched)
    }

    /// Atomic find-and-reserve.
    ///
    /// Scans for a block, applies the holdback policy of `nature` and marks
    /// the block `BookingPending`, all under the performance's write lock.
    ///
    /// ## Errors
    /// - [`StoreError::PerformanceNotFound`] when no plan is registered
    pub fn allocate(
        &self,
        performance_id: PerformanceId,
        request: &SeatRequest,
        nature: PerformanceNature,
    ) -> StoreResult<AllocationOutcome> {
        let handle = self
            .handle(performance_id)?
            .ok_or(StoreError::PerformanceNotFound(performance_id))?;

        let mut room = handle.write().map_err(StoreError::poisoned("room"))?;
        let outcome = allocation::allocate(&mut room, request, nature);

        let occupancy = outcome.occupancy();
        debug!(
            performance_id,
            count = request.count,
            category = %request.category,
            %nature,
            allocated = outcome.is_allocated(),
            total_seats = occupancy.total_seats,
            remaining_seats = occupancy.remaining_seats,
            "Scanned seating plan"
        );

        Ok(outcome)
    }

    /// Free / booked / pending counts, `None` for unknown performances.
    pub fn seat_counts(&self, performance_id: PerformanceId) -> StoreResult<Option<SeatCounts>> {
        let Some(handle) = self.handle(performance_id)? else {
            return Ok(None);
        };
        let room = handle.read().map_err(StoreError::poisoned("room"))?;
        Ok(Some(room.seat_counts()))
    }

    fn handle(&self, performance_id: PerformanceId) -> StoreResult<Option<RoomHandle>> {
        Ok(self
            .rooms
            .read()
            .map_err(StoreError::poisoned("rooms"))?
            .get(&performance_id)
            .cloned())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
