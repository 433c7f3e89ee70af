//! Hard caps on externally supplied input. Everything here bounds a single
//! request; none of it is tunable at runtime.

/// Widest stay a resolution will price, in nights.
pub const MAX_RANGE_NIGHTS: u32 = 365;

/// Widest day span a bulk override edit may cover (inclusive of both ends).
pub const MAX_BULK_RANGE_DAYS: u32 = 366;

/// Longest accepted guest name on a booking request.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted free-text message on a booking request.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Default ceiling on one external-channel fetch before the engine falls
/// back to local pricing.
pub const EXTERNAL_FETCH_TIMEOUT_MS: u64 = 10_000;
