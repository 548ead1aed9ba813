//! # Theater Service
//!
//! Orchestrates a reservation: id, atomic allocation, persistence, pricing.
//!
//! ## Reserve Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reserve(customer, 4, STANDARD, performance)                            │
//! │       │                                                                 │
//! │       ├── 1. validate count ≥ 1 ──────────── ServiceError::Validation  │
//! │       ├── 2. ReservationStore::next_id ───── 123456                     │
//! │       ├── 3. RoomStore::allocate ─────────── one write lock:            │
//! │       │                                      scan → holdback → pending  │
//! │       ├── 4. ReservationStore::put ───────── PENDING (seats) or ABORTED │
//! │       ├── 5. PricingPolicy::bill ─────────── catalogue price, subscriber│
//! │       │                                      discount, voucher rate     │
//! │       ▼                                                                 │
//! │  ReservationOutcome { id, status, seats, bill }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service owns no global state: every store and catalogue is handed in
//! at construction, so tests build as many independent box offices as they
//! like.

use std::sync::Arc;

use encore_core::allocation::{AllocationOutcome, Occupancy, SeatRequest};
use encore_core::validation::validate_seat_count;
use encore_core::{
    AllocatedSeat, Amount, Bill, CustomerId, Performance, PerformanceId, PriceCatalog,
    PricingPolicy, Reservation, ReservationId, ReservationStatus, SeatStatus,
    SubscriptionRegistry, VoucherProgram, ZoneCategory,
};
use encore_store::{ReservationStore, RoomStore, StoreError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ServiceResult;

// =============================================================================
// Outcome
// =============================================================================

/// Everything a receipt needs about one reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationOutcome {
    pub reservation_id: ReservationId,
    pub performance: Performance,
    pub requested_category: ZoneCategory,
    pub status: ReservationStatus,
    /// Seats secured, empty when the reservation was aborted.
    pub seats: Vec<AllocatedSeat>,
    pub bill: Bill,
}

impl ReservationOutcome {
    /// Returns true when seats were secured.
    pub fn is_fulfillable(&self) -> bool {
        !self.seats.is_empty()
    }

    pub fn amount_due(&self) -> Amount {
        self.bill.total
    }

    pub fn seat_ids(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.id.clone()).collect()
    }
}

// =============================================================================
// Service
// =============================================================================

/// Reservation orchestrator.
///
/// Cheap to share across threads: every handle is an `Arc`.
#[derive(Clone)]
pub struct TheaterService {
    rooms: Arc<RoomStore>,
    reservations: Arc<ReservationStore>,
    prices: Arc<dyn PriceCatalog>,
    vouchers: Arc<dyn VoucherProgram>,
    subscriptions: Arc<dyn SubscriptionRegistry>,
    pricing: PricingPolicy,
}

impl TheaterService {
    pub fn new(
        rooms: Arc<RoomStore>,
        reservations: Arc<ReservationStore>,
        prices: Arc<dyn PriceCatalog>,
        vouchers: Arc<dyn VoucherProgram>,
        subscriptions: Arc<dyn SubscriptionRegistry>,
    ) -> Self {
        TheaterService {
            rooms,
            reservations,
            prices,
            vouchers,
            subscriptions,
            pricing: PricingPolicy::default(),
        }
    }

    pub fn with_pricing_policy(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn rooms(&self) -> &RoomStore {
        &self.rooms
    }

    pub fn reservations(&self) -> &ReservationStore {
        &self.reservations
    }

    /// Reserves `count` contiguous seats of `category` for `customer_id`.
    ///
    /// Finding no seats is not an error: the reservation is recorded as
    /// `ABORTED` and the outcome carries no seats and a zero bill. A
    /// performance without a seating plan behaves like an empty room.
    ///
    /// ## Errors
    /// - [`crate::error::ServiceError::Validation`] when `count` is zero;
    ///   no id is consumed
    /// - [`crate::error::ServiceError::Store`] when a lock is poisoned or
    ///   the id sequence is exhausted
    pub fn reserve(
        &self,
        customer_id: CustomerId,
        count: usize,
        category: ZoneCategory,
        performance: &Performance,
    ) -> ServiceResult<ReservationOutcome> {
        validate_seat_count(count)?;

        let reservation_id = self.reservations.next_id()?;
        let request = SeatRequest::new(count, category);

        let allocation = match self.rooms.allocate(performance.id, &request, performance.nature) {
            Ok(allocation) => allocation,
            Err(StoreError::PerformanceNotFound(performance_id)) => {
                warn!(performance_id, reservation_id, "No seating plan for performance");
                AllocationOutcome::NoContiguousBlock {
                    occupancy: Occupancy::default(),
                }
            }
            Err(err) => return Err(err.into()),
        };

        match &allocation {
            AllocationOutcome::Withheld { policy, occupancy } => warn!(
                reservation_id,
                performance_id = performance.id,
                nature = %performance.nature,
                keep_percent = policy.keep_percent(),
                remaining_seats = occupancy.remaining_seats,
                total_seats = occupancy.total_seats,
                "Not enough seats left to honour the holdback"
            ),
            AllocationOutcome::NoContiguousBlock { occupancy } => debug!(
                reservation_id,
                remaining_seats = occupancy.remaining_seats,
                "No contiguous block available"
            ),
            AllocationOutcome::Allocated { .. } => {}
        }

        let seats = allocation.into_seats();
        let reservation = if seats.is_empty() {
            Reservation::aborted(reservation_id, performance.id)
        } else {
            Reservation::pending(
                reservation_id,
                performance.id,
                seats.iter().map(|s| s.id.clone()).collect(),
            )
        };
        let status = reservation.status;
        self.reservations.put(reservation)?;

        let bill = self.pricing.bill(
            &seats,
            self.prices.base_price(performance.id),
            self.subscriptions.is_subscribed(customer_id),
            self.vouchers.voucher_rate(performance.start_time_utc()),
        );

        info!(
            reservation_id,
            customer_id,
            performance_id = performance.id,
            %status,
            seats = seats.len(),
            amount_due = %bill.total,
            "Reservation processed"
        );

        Ok(ReservationOutcome {
            reservation_id,
            performance: performance.clone(),
            requested_category: category,
            status,
            seats,
            bill,
        })
    }

    /// Frees `seat_ids` in the performance's room, then cancels the
    /// reservation.
    ///
    /// The listed seats are freed as given, whether or not the reservation
    /// held them, and the seats the reservation holds are freed in its own
    /// performance's room whatever the caller listed. Unknown reservations
    /// and unknown seats are ignored.
    pub fn cancel<S: AsRef<str>>(
        &self,
        reservation_id: ReservationId,
        performance_id: PerformanceId,
        seat_ids: &[S],
    ) -> ServiceResult<()> {
        let freed = self
            .rooms
            .set_seat_status(performance_id, seat_ids, SeatStatus::Free)?;

        match self.release(reservation_id)? {
            Some((held_in, held)) => info!(
                reservation_id,
                performance_id = held_in,
                listed = freed,
                held,
                "Reservation cancelled"
            ),
            None => debug!(reservation_id, freed, "Cancel for unknown reservation"),
        }

        Ok(())
    }

    /// Cancels a reservation using the seats it holds.
    ///
    /// Returns false when the id is unknown. Cancelling twice frees nothing
    /// the second time.
    pub fn cancel_reservation(&self, reservation_id: ReservationId) -> ServiceResult<bool> {
        match self.release(reservation_id)? {
            Some((performance_id, freed)) => {
                info!(reservation_id, performance_id, freed, "Reservation cancelled");
                Ok(true)
            }
            None => {
                debug!(reservation_id, "Cancel for unknown reservation");
                Ok(false)
            }
        }
    }

    /// Frees the seats an active reservation holds, then marks it Cancelled.
    ///
    /// Runs under the reservation table's write lock, taking the room lock
    /// inside it (never the other way round). A failed free leaves the
    /// reservation Pending with its seats.
    fn release(
        &self,
        reservation_id: ReservationId,
    ) -> ServiceResult<Option<(PerformanceId, usize)>> {
        let rooms = &self.rooms;
        let released = self.reservations.update(
            reservation_id,
            |reservation| -> ServiceResult<(PerformanceId, usize)> {
                let freed = if reservation.is_active() {
                    rooms.set_seat_status(
                        reservation.performance_id,
                        &reservation.seats,
                        SeatStatus::Free,
                    )?
                } else {
                    0
                };
                reservation.cancel()?;
                Ok((reservation.performance_id, freed))
            },
        )?;

        released.transpose()
    }

    pub fn find_reservation(&self, reservation_id: ReservationId) -> ServiceResult<Option<Reservation>> {
        Ok(self.reservations.get(reservation_id)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use encore_core::Rate;
    use encore_store::{seed, FixedPriceCatalog, NoVoucher, SubscriberList};
    use rust_decimal_macros::dec;

    fn service() -> TheaterService {
        let rooms = Arc::new(RoomStore::new());
        seed::seed_rooms(&rooms).unwrap();

        TheaterService::new(
            rooms,
            Arc::new(ReservationStore::new()),
            Arc::new(FixedPriceCatalog::new(Amount::from_decimal(dec!(10.00)))),
            Arc::new(NoVoucher),
            Arc::new(SubscriberList::new()),
        )
    }

    #[test]
    fn test_zero_seats_is_rejected_without_consuming_an_id() {
        let service = service();
        let err = service
            .reserve(1, 0, ZoneCategory::Standard, &seed::performance_cicd())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let outcome = service
            .reserve(1, 1, ZoneCategory::Standard, &seed::performance_cicd())
            .unwrap();
        assert_eq!(outcome.reservation_id, 123456);
    }

    #[test]
    fn test_pending_reservation_is_stored() {
        let service = service();
        let outcome = service
            .reserve(5, 2, ZoneCategory::Premium, &seed::performance_cicd())
            .unwrap();

        assert_eq!(outcome.status, ReservationStatus::Pending);
        assert_eq!(outcome.seat_ids(), vec!["H5", "H6"]);
        assert_eq!(outcome.amount_due().to_display(), "30.00");

        let stored = service.find_reservation(outcome.reservation_id).unwrap().unwrap();
        assert_eq!(stored.seats, vec!["H5", "H6"]);
        assert_eq!(stored.performance_id, 1);
    }

    #[test]
    fn test_unknown_performance_aborts() {
        let service = service();
        let mut performance = seed::performance_cicd();
        performance.id = 42;

        let outcome = service
            .reserve(1, 2, ZoneCategory::Standard, &performance)
            .unwrap();
        assert_eq!(outcome.status, ReservationStatus::Aborted);
        assert!(!outcome.is_fulfillable());
        assert!(outcome.amount_due().is_zero());
        assert!(service.find_reservation(outcome.reservation_id).unwrap().is_some());
    }

    #[test]
    fn test_cancel_unknown_reservation_still_frees_seats() {
        let service = service();
        service.cancel(1, 1, &["B2"]).unwrap();

        let room = service.rooms().get(1).unwrap().unwrap();
        assert_eq!(room.seat("B2").unwrap().status, SeatStatus::Free);
        assert!(service.find_reservation(1).unwrap().is_none());
    }

    #[test]
    fn test_cancel_reservation_uses_stored_seats() {
        let service = service();
        let outcome = service
            .reserve(1, 3, ZoneCategory::Standard, &seed::performance_cicd())
            .unwrap();

        assert!(service.cancel_reservation(outcome.reservation_id).unwrap());
        let counts = service.rooms().seat_counts(1).unwrap().unwrap();
        assert_eq!(counts.pending, 0);
        assert_eq!(counts.free, 70);

        // second cancel is a no-op but the reservation exists
        assert!(service.cancel_reservation(outcome.reservation_id).unwrap());
        assert!(!service.cancel_reservation(999).unwrap());

        let stored = service.find_reservation(outcome.reservation_id).unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
        assert!(stored.seats.is_empty());
    }

    #[test]
    fn test_cancel_frees_held_seats_the_caller_did_not_list() {
        let service = service();
        let outcome = service
            .reserve(1, 4, ZoneCategory::Standard, &seed::performance_cicd())
            .unwrap();

        service
            .cancel(outcome.reservation_id, 1, &[] as &[&str])
            .unwrap();

        let counts = service.rooms().seat_counts(1).unwrap().unwrap();
        assert_eq!(counts.pending, 0);
        assert_eq!(counts.free, 70);
        let stored = service.find_reservation(outcome.reservation_id).unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_cancel_with_wrong_performance_frees_the_held_room() {
        let service = service();
        let outcome = service
            .reserve(1, 2, ZoneCategory::Premium, &seed::performance_cicd())
            .unwrap();

        service
            .cancel(outcome.reservation_id, 3, &["R9-9"])
            .unwrap();

        let room = service.rooms().get(1).unwrap().unwrap();
        for id in outcome.seat_ids() {
            assert_eq!(room.seat(&id).unwrap().status, SeatStatus::Free);
        }
        assert_eq!(service.rooms().seat_counts(3).unwrap().unwrap().pending, 0);
    }

    #[test]
    fn test_stale_cancel_leaves_reused_seats_alone() {
        let service = service();
        let premiere = seed::performance_cicd();
        let first = service.reserve(1, 4, ZoneCategory::Standard, &premiere).unwrap();

        assert!(service.cancel_reservation(first.reservation_id).unwrap());
        let second = service.reserve(2, 4, ZoneCategory::Standard, &premiere).unwrap();
        assert_eq!(second.seat_ids(), first.seat_ids());

        // the first reservation no longer holds anything
        assert!(service.cancel_reservation(first.reservation_id).unwrap());
        service
            .cancel(first.reservation_id, 1, &[] as &[&str])
            .unwrap();

        let room = service.rooms().get(1).unwrap().unwrap();
        for id in second.seat_ids() {
            assert_eq!(room.seat(&id).unwrap().status, SeatStatus::BookingPending);
        }
        let stored = service.find_reservation(second.reservation_id).unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_cancel_marks_aborted_reservation_cancelled() {
        let service = service();
        let mut unknown = seed::performance_cicd();
        unknown.id = 42;
        let outcome = service
            .reserve(1, 2, ZoneCategory::Standard, &unknown)
            .unwrap();

        assert!(service.cancel_reservation(outcome.reservation_id).unwrap());
        let stored = service.find_reservation(outcome.reservation_id).unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
        assert_eq!(service.rooms().seat_counts(1).unwrap().unwrap().pending, 0);
    }

    #[test]
    fn test_exhausted_ids_fail_before_allocating() {
        let rooms = Arc::new(RoomStore::new());
        seed::seed_rooms(&rooms).unwrap();
        let service = TheaterService::new(
            rooms,
            Arc::new(ReservationStore::with_id_floor(ReservationId::MAX)),
            Arc::new(FixedPriceCatalog::new(Amount::from_decimal(dec!(10.00)))),
            Arc::new(NoVoucher),
            Arc::new(SubscriberList::new()),
        );

        let err = service
            .reserve(1, 2, ZoneCategory::Standard, &seed::performance_cicd())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::IdsExhausted(_))));
        assert_eq!(service.rooms().seat_counts(1).unwrap().unwrap().pending, 0);
    }

    #[test]
    fn test_custom_pricing_policy() {
        let rooms = Arc::new(RoomStore::new());
        seed::seed_rooms(&rooms).unwrap();
        let service = TheaterService::new(
            rooms,
            Arc::new(ReservationStore::new()),
            Arc::new(FixedPriceCatalog::new(Amount::from_decimal(dec!(10.00)))),
            Arc::new(NoVoucher),
            Arc::new([9].into_iter().collect::<SubscriberList>()),
        )
        .with_pricing_policy(PricingPolicy::with_subscriber_discount_percent(dec!(50)));

        let outcome = service
            .reserve(9, 2, ZoneCategory::Standard, &seed::performance_cicd())
            .unwrap();
        assert_eq!(outcome.bill.subtotal.to_display(), "20.00");
        assert_eq!(outcome.amount_due().to_display(), "10.00");
        assert_eq!(
            service.pricing.subscriber_discount(),
            Rate::from_decimal(dec!(0.5))
        );
    }
}
