pub mod engine;
pub mod external;
pub mod limits;
pub mod model;
pub mod observability;
pub mod store;

pub use engine::{Engine, EngineError};
pub use external::{DayQuote, ExternalError, ExternalSource, StaticChannel};
pub use model::{
    BlockSource, Booking, BookingCandidate, BookingStatus, DayRange, Eur, PricingOverride,
    UnitConfig, Verdict,
};
pub use store::{InMemoryStore, RecordStore};
