use chrono::NaiveDate;

use crate::limits::MAX_RANGE_NIGHTS;
use crate::model::{Booking, BookingStatus, DayRange, UnitConfig};

use super::EngineError;

/// True if any approved booking's half-open range intersects `range`.
/// Pending and rejected requests never occupy days, and back-to-back stays
/// (checkout day == next checkin day) never conflict.
pub(super) fn range_conflicts(bookings: &[Booking], range: &DayRange) -> bool {
    bookings
        .iter()
        .any(|b| b.status == BookingStatus::Approved && b.range().overlaps(range))
}

pub(super) fn validate_range(
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<DayRange, EngineError> {
    if check_out <= check_in {
        return Err(EngineError::InvalidRange { check_in, check_out });
    }
    let range = DayRange::new(check_in, check_out);
    if range.nights() > MAX_RANGE_NIGHTS {
        return Err(EngineError::LimitExceeded("date range too wide"));
    }
    Ok(range)
}

pub(super) fn validate_guest_count(config: &UnitConfig, guest_count: u32) -> Result<(), EngineError> {
    if guest_count == 0 || guest_count > config.max_guests {
        return Err(EngineError::InvalidGuestCount(guest_count));
    }
    Ok(())
}
