use chrono::{NaiveDate, Utc};
use tracing::info;
use ulid::Ulid;

use crate::limits::{MAX_BULK_RANGE_DAYS, MAX_MESSAGE_LEN, MAX_NAME_LEN};
use crate::model::{Booking, BookingCandidate, BookingStatus, Eur, PricingOverride};
use crate::observability;
use crate::store::RecordStore;

use super::conflict::{validate_guest_count, validate_range};
use super::{Engine, EngineError};

fn validate_contact(candidate: &BookingCandidate) -> Result<(), EngineError> {
    if candidate.name.trim().is_empty() {
        return Err(EngineError::MissingContact("name"));
    }
    if candidate.name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded("name too long"));
    }
    if candidate.email.trim().is_empty() || !candidate.email.contains('@') {
        return Err(EngineError::MissingContact("email"));
    }
    if candidate.message.len() > MAX_MESSAGE_LEN {
        return Err(EngineError::LimitExceeded("message too long"));
    }
    Ok(())
}

impl Engine {
    /// Persist a pending booking for a stay the guest just resolved.
    ///
    /// The candidate must match the latest recorded verdict for its unit
    /// exactly (same dates, same guest count) and that verdict must be
    /// positive. Resolution is not re-run here: the window between verdict
    /// and write is accepted, and the administrator decides the request
    /// before it ever occupies a day.
    pub fn submit(&self, candidate: BookingCandidate) -> Result<Booking, EngineError> {
        let range = validate_range(candidate.check_in, candidate.check_out)?;
        validate_guest_count(&self.config, candidate.guest_count)?;
        validate_contact(&candidate)?;

        let total_price = {
            let latest = self
                .latest
                .get(&candidate.unit_id)
                .ok_or(EngineError::Unresolved)?;
            if latest.range != range || latest.guest_count != candidate.guest_count {
                return Err(EngineError::Unresolved);
            }
            if !latest.verdict.available {
                return Err(EngineError::Unavailable);
            }
            latest.verdict.total_price
        };

        let booking = Booking {
            id: Ulid::new(),
            unit_id: candidate.unit_id,
            check_in: candidate.check_in,
            check_out: candidate.check_out,
            guest_count: candidate.guest_count,
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            message: candidate.message,
            total_price,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };
        self.store.append_booking(booking.clone());

        metrics::counter!(observability::BOOKINGS_SUBMITTED_TOTAL).increment(1);
        info!(
            id = %booking.id,
            unit = %booking.unit_id,
            nights = range.nights(),
            total = total_price,
            "booking request submitted"
        );
        Ok(booking)
    }

    /// Approve or reject a pending request. Decisions are one-shot and only
    /// approval makes the stay occupy calendar days.
    pub fn decide_booking(
        &self,
        unit_id: Ulid,
        id: Ulid,
        approve: bool,
    ) -> Result<Booking, EngineError> {
        let existing = self
            .store
            .list_bookings(unit_id)
            .into_iter()
            .find(|b| b.id == id)
            .ok_or(EngineError::NotFound(id))?;
        if existing.status != BookingStatus::Pending {
            return Err(EngineError::AlreadyDecided(id));
        }

        let status = if approve {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = self
            .store
            .update_booking_status(id, status)
            .ok_or(EngineError::NotFound(id))?;

        metrics::counter!(observability::BOOKINGS_DECIDED_TOTAL).increment(1);
        info!(id = %id, unit = %unit_id, approved = approve, "booking decided");
        Ok(updated)
    }

    /// Create or update the override for a single day. An existing record
    /// for the day is edited in place rather than shadowed by a duplicate.
    pub fn set_override(
        &self,
        unit_id: Ulid,
        date: NaiveDate,
        price: Eur,
        available: bool,
        minimum_stay: u32,
    ) -> Result<PricingOverride, EngineError> {
        if minimum_stay == 0 {
            return Err(EngineError::LimitExceeded("minimum stay must be at least one night"));
        }
        if price < 0.0 {
            return Err(EngineError::LimitExceeded("price must not be negative"));
        }

        let rule = match self.get_override(unit_id, date) {
            Some(existing) => PricingOverride {
                price,
                available,
                minimum_stay,
                ..existing
            },
            None => PricingOverride {
                id: Ulid::new(),
                unit_id,
                date,
                price,
                available,
                minimum_stay,
                created_at: Utc::now(),
            },
        };
        self.store.upsert_override(rule.clone());
        Ok(rule)
    }

    /// Apply the same price/availability to every day from `from` through
    /// `to`. The calendar editor selects whole days, so unlike a stay the
    /// end day is included.
    pub fn set_override_range(
        &self,
        unit_id: Ulid,
        from: NaiveDate,
        to: NaiveDate,
        price: Eur,
        available: bool,
        minimum_stay: u32,
    ) -> Result<Vec<PricingOverride>, EngineError> {
        if to < from {
            return Err(EngineError::InvalidRange { check_in: from, check_out: to });
        }
        let days = (to - from).num_days() as u32 + 1;
        if days > MAX_BULK_RANGE_DAYS {
            return Err(EngineError::LimitExceeded("bulk range too wide"));
        }

        let mut rules = Vec::with_capacity(days as usize);
        for day in from.iter_days().take(days as usize) {
            rules.push(self.set_override(unit_id, day, price, available, minimum_stay)?);
        }
        info!(unit = %unit_id, %from, %to, days, "bulk override applied");
        Ok(rules)
    }

    pub fn remove_override(&self, id: Ulid) -> Result<(), EngineError> {
        if self.store.delete_override(id) {
            Ok(())
        } else {
            Err(EngineError::NotFound(id))
        }
    }
}
