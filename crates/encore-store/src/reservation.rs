//! # Reservation Store
//!
//! The reservation table and its id sequence.
//!
//! ```text
//! ┌───────────────────────────┐      ┌──────────────────────────────────────┐
//! │ Mutex<ReservationId>      │      │ RwLock<HashMap<id, Reservation>>     │
//! │ held for one increment    │      │ put / update → write, get → read     │
//! │ 123455 → 123456 → ...     │      │ rows are never deleted               │
//! └───────────────────────────┘      └──────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use encore_core::{Reservation, ReservationId, DEFAULT_RESERVATION_ID_FLOOR};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Concurrency-safe reservation table.
#[derive(Debug)]
pub struct ReservationStore {
    last_id: Mutex<ReservationId>,
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
}

impl Default for ReservationStore {
    fn default() -> Self {
        ReservationStore::with_id_floor(DEFAULT_RESERVATION_ID_FLOOR)
    }
}

impl ReservationStore {
    pub fn new() -> Self {
        ReservationStore::default()
    }

    /// A store whose first id is `floor + 1`.
    pub fn with_id_floor(floor: ReservationId) -> Self {
        ReservationStore {
            last_id: Mutex::new(floor),
            reservations: RwLock::new(HashMap::new()),
        }
    }

    /// Hands out the next id. Ids are strictly increasing and never reused.
    ///
    /// Fails with [`StoreError::IdsExhausted`] once the sequence reaches
    /// `i64::MAX`; the counter is left unchanged.
    pub fn next_id(&self) -> StoreResult<ReservationId> {
        let mut last = self
            .last_id
            .lock()
            .map_err(StoreError::poisoned("reservation id"))?;
        let next = last.checked_add(1).ok_or(StoreError::IdsExhausted(*last))?;
        *last = next;
        Ok(next)
    }

    /// Inserts or replaces the reservation with the same id.
    pub fn put(&self, reservation: Reservation) -> StoreResult<()> {
        debug!(
            reservation_id = reservation.id,
            status = %reservation.status,
            seats = reservation.seats.len(),
            "Stored reservation"
        );
        self.reservations
            .write()
            .map_err(StoreError::poisoned("reservations"))?
            .insert(reservation.id, reservation);
        Ok(())
    }

    /// Returns a copy of the reservation.
    pub fn get(&self, id: ReservationId) -> StoreResult<Option<Reservation>> {
        Ok(self
            .reservations
            .read()
            .map_err(StoreError::poisoned("reservations"))?
            .get(&id)
            .cloned())
    }

    /// Runs `f` on the stored reservation under the write lock.
    ///
    /// Returns `None` without calling `f` when the id is unknown.
    pub fn update<T, F>(&self, id: ReservationId, f: F) -> StoreResult<Option<T>>
    where
        F: FnOnce(&mut Reservation) -> T,
    {
        let mut reservations = self
            .reservations
            .write()
            .map_err(StoreError::poisoned("reservations"))?;
        Ok(reservations.get_mut(&id).map(f))
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self
            .reservations
            .read()
            .map_err(StoreError::poisoned("reservations"))?
            .len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
