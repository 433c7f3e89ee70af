use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Euro amounts — the only money type.
pub type Eur = f64;

/// Whole nights between two calendar days. Equal or inverted pairs count as
/// zero nights; callers treat zero as unbookable.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    if check_out <= check_in {
        return 0;
    }
    (check_out - check_in).num_days() as u32
}

/// Half-open range of calendar days `[check_in, check_out)`. The check-out
/// day is never part of the stay, so back-to-back stays share a calendar day
/// without conflicting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        debug_assert!(check_in < check_out, "check-in must precede check-out");
        Self { check_in, check_out }
    }

    pub fn nights(&self) -> u32 {
        nights_between(self.check_in, self.check_out)
    }

    /// Every day of the stay in ascending order, check-out excluded.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.check_out;
        self.check_in.iter_days().take_while(move |d| *d < end)
    }

    pub fn overlaps(&self, other: &DayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted by a guest, awaiting an administrative decision.
    Pending,
    /// Confirmed by the host; occupies its calendar days.
    Approved,
    /// Declined; kept for the record, never occupies days.
    Rejected,
}

/// A stay request persisted through the record store. Only `Approved`
/// bookings count for conflict purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub unit_id: Ulid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub total_price: Eur,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn range(&self) -> DayRange {
        DayRange::new(self.check_in, self.check_out)
    }
}

/// Guest input for a commit; everything a `Booking` needs except what the
/// engine fills in itself (id, price, status, timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCandidate {
    pub unit_id: Ulid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Administrator-set exception to base pricing/availability for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOverride {
    pub id: Ulid,
    pub unit_id: Ulid,
    pub date: NaiveDate,
    pub price: Eur,
    pub available: bool,
    /// Stored for the calendar editor; the resolver does not yet compare it
    /// against the requested night count.
    pub minimum_stay: u32,
    pub created_at: DateTime<Utc>,
}

/// Facts about the single unit this engine manages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    /// Nightly rate when no override applies.
    pub base_price: Eur,
    /// Guests included in the nightly rate.
    pub base_occupancy: u32,
    /// Per extra guest, per night, beyond `base_occupancy`.
    pub extra_guest_fee: Eur,
    pub max_guests: u32,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            base_price: 200.0,
            base_occupancy: 6,
            extra_guest_fee: 20.0,
            max_guests: 8,
        }
    }
}

/// Which source of truth blocked a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockSource {
    LocalBooking,
    LocalOverride,
    External,
}

pub const REASON_PLATFORM_BOOKED: &str = "already booked on this platform";
pub const REASON_MARKED_UNAVAILABLE: &str = "manually marked unavailable";
pub const REASON_CHANNEL_BOOKED: &str = "already booked on the external channel";

/// The combined availability and price decision for one requested stay.
/// Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub available: bool,
    pub total_price: Eur,
    pub blocking_source: Option<BlockSource>,
    pub blocking_reason: Option<String>,
}

impl Verdict {
    pub fn open(total_price: Eur) -> Self {
        Self {
            available: true,
            total_price,
            blocking_source: None,
            blocking_reason: None,
        }
    }

    pub fn blocked(source: BlockSource, reason: impl Into<String>) -> Self {
        Self {
            available: false,
            total_price: 0.0,
            blocking_source: Some(source),
            blocking_reason: Some(reason.into()),
        }
    }
}
