use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{nights_between, Booking, BookingStatus, DayRange, Eur, PricingOverride, Verdict};
use crate::store::RecordStore;

use super::conflict::range_conflicts;
use super::Engine;

/// Index overrides by day. The store lists records in insertion order, so
/// `or_insert` makes the first-inserted record win when duplicates exist;
/// every read path shares this choice.
pub(super) fn override_index(overrides: Vec<PricingOverride>) -> HashMap<NaiveDate, PricingOverride> {
    let mut index = HashMap::new();
    for rule in overrides {
        index.entry(rule.date).or_insert(rule);
    }
    index
}

/// Nightly price from local data alone: the day's override if present, else
/// the unit's base price.
pub(super) fn local_day_price(
    index: &HashMap<NaiveDate, PricingOverride>,
    day: NaiveDate,
    base_price: Eur,
) -> Eur {
    index.get(&day).map_or(base_price, |rule| rule.price)
}

impl Engine {
    /// Calendar days occupied by approved bookings of the unit.
    pub fn occupied_days(&self, unit_id: Ulid) -> HashSet<NaiveDate> {
        let mut days = HashSet::new();
        for booking in self.store.list_bookings(unit_id) {
            if booking.status == BookingStatus::Approved {
                days.extend(booking.range().days());
            }
        }
        days
    }

    /// True iff `[check_in, check_out)` intersects an approved booking.
    /// Empty and inverted ranges intersect nothing.
    pub fn range_overlaps(&self, unit_id: Ulid, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        if nights_between(check_in, check_out) == 0 {
            return false;
        }
        let range = DayRange::new(check_in, check_out);
        range_conflicts(&self.store.list_bookings(unit_id), &range)
    }

    /// First-inserted override for the date, if any.
    pub fn get_override(&self, unit_id: Ulid, date: NaiveDate) -> Option<PricingOverride> {
        self.store
            .list_overrides(unit_id)
            .into_iter()
            .find(|rule| rule.date == date)
    }

    pub fn list_bookings(&self, unit_id: Ulid) -> Vec<Booking> {
        self.store.list_bookings(unit_id)
    }

    /// All overrides for the unit, ordered by date for calendar display.
    pub fn list_overrides(&self, unit_id: Ulid) -> Vec<PricingOverride> {
        let mut overrides = self.store.list_overrides(unit_id);
        overrides.sort_by_key(|rule| rule.date);
        overrides
    }

    /// Verdict of the most recent completed resolution for the unit.
    pub fn last_verdict(&self, unit_id: Ulid) -> Option<Verdict> {
        self.latest.get(&unit_id).map(|r| r.verdict.clone())
    }
}
