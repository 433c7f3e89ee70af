use chrono::NaiveDate;
use ulid::Ulid;

#[derive(Debug)]
pub enum EngineError {
    /// Check-out does not fall strictly after check-in.
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    InvalidGuestCount(u32),
    MissingContact(&'static str),
    LimitExceeded(&'static str),
    /// Commit attempted without a resolution for the exact requested stay.
    Unresolved,
    /// Commit attempted against a verdict that blocked the stay.
    Unavailable,
    /// A newer resolution started while this one awaited the channel; the
    /// result was discarded.
    Superseded,
    NotFound(Ulid),
    /// The booking already left `Pending`; decisions are one-shot.
    AlreadyDecided(Ulid),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRange { check_in, check_out } => {
                write!(f, "invalid date range: [{check_in}, {check_out})")
            }
            EngineError::InvalidGuestCount(n) => write!(f, "invalid guest count: {n}"),
            EngineError::MissingContact(field) => write!(f, "missing contact field: {field}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::Unresolved => write!(f, "no resolution for the requested stay"),
            EngineError::Unavailable => write!(f, "requested dates are not available"),
            EngineError::Superseded => write!(f, "superseded by a newer request"),
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::AlreadyDecided(id) => write!(f, "booking already decided: {id}"),
        }
    }
}

impl std::error::Error for EngineError {}
