use std::sync::RwLock;

use ulid::Ulid;

use crate::model::{Booking, BookingStatus, PricingOverride};

/// Persistence seam for bookings and pricing overrides. The store owns the
/// records; the engine only reads them and appends new bookings.
///
/// Reads of never-seen units return empty collections. Implementations must
/// preserve insertion order in listings; duplicate overrides for one day
/// are disambiguated by "first inserted wins".
pub trait RecordStore: Send + Sync {
    fn list_bookings(&self, unit_id: Ulid) -> Vec<Booking>;
    fn append_booking(&self, booking: Booking);
    /// Patch a booking's status; `None` when the id is unknown. Status is
    /// the only field an administrator ever edits after submission.
    fn update_booking_status(&self, id: Ulid, status: BookingStatus) -> Option<Booking>;
    fn list_overrides(&self, unit_id: Ulid) -> Vec<PricingOverride>;
    /// Insert, or replace the record carrying the same id.
    fn upsert_override(&self, rule: PricingOverride);
    /// True when a record was removed.
    fn delete_override(&self, id: Ulid) -> bool;
}

/// Insertion-ordered store backed by plain vectors. The default for tests
/// and single-process embedding.
#[derive(Default)]
pub struct InMemoryStore {
    bookings: RwLock<Vec<Booking>>,
    overrides: RwLock<Vec<PricingOverride>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn list_bookings(&self, unit_id: Ulid) -> Vec<Booking> {
        self.bookings
            .read()
            .expect("store lock poisoned")
            .iter()
            .filter(|b| b.unit_id == unit_id)
            .cloned()
            .collect()
    }

    fn append_booking(&self, booking: Booking) {
        self.bookings
            .write()
            .expect("store lock poisoned")
            .push(booking);
    }

    fn update_booking_status(&self, id: Ulid, status: BookingStatus) -> Option<Booking> {
        let mut bookings = self.bookings.write().expect("store lock poisoned");
        let booking = bookings.iter_mut().find(|b| b.id == id)?;
        booking.status = status;
        Some(booking.clone())
    }

    fn list_overrides(&self, unit_id: Ulid) -> Vec<PricingOverride> {
        self.overrides
            .read()
            .expect("store lock poisoned")
            .iter()
            .filter(|r| r.unit_id == unit_id)
            .cloned()
            .collect()
    }

    fn upsert_override(&self, rule: PricingOverride) {
        let mut overrides = self.overrides.write().expect("store lock poisoned");
        match overrides.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => overrides.push(rule),
        }
    }

    fn delete_override(&self, id: Ulid) -> bool {
        let mut overrides = self.overrides.write().expect("store lock poisoned");
        let before = overrides.len();
        overrides.retain(|r| r.id != id);
        overrides.len() < before
    }
}
