mod conflict;
mod error;
mod mutations;
mod queries;
mod resolve;

pub use error::EngineError;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use ulid::Ulid;

use crate::external::ExternalSource;
use crate::limits::EXTERNAL_FETCH_TIMEOUT_MS;
use crate::model::{DayRange, UnitConfig, Verdict};
use crate::store::RecordStore;

/// Outcome of the most recent completed resolution for a unit, kept so a
/// later commit can be validated against exactly what the guest saw.
#[derive(Debug, Clone)]
struct LastResolution {
    range: DayRange,
    guest_count: u32,
    verdict: Verdict,
}

/// Orchestrates the three sources of truth (platform bookings, per-day
/// overrides, the external channel) into one availability and price
/// verdict, and commits accepted stays back through the record store.
pub struct Engine {
    store: Arc<dyn RecordStore>,
    external: Arc<dyn ExternalSource>,
    config: UnitConfig,
    fetch_timeout: Duration,
    /// Latest resolution ticket issued per unit. A completion holding an
    /// older ticket is stale and must be discarded.
    tickets: DashMap<Ulid, u64>,
    latest: DashMap<Ulid, LastResolution>,
}

impl Engine {
    pub fn new(
        store: Arc<dyn RecordStore>,
        external: Arc<dyn ExternalSource>,
        config: UnitConfig,
    ) -> Self {
        Self {
            store,
            external,
            config,
            fetch_timeout: Duration::from_millis(EXTERNAL_FETCH_TIMEOUT_MS),
            tickets: DashMap::new(),
            latest: DashMap::new(),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    /// Issue the next resolution ticket for a unit. Any in-flight resolution
    /// holding an older ticket is superseded from this point on.
    fn issue_ticket(&self, unit_id: Ulid) -> u64 {
        let mut entry = self.tickets.entry(unit_id).or_insert(0);
        *entry += 1;
        *entry
    }

    fn is_current(&self, unit_id: Ulid, ticket: u64) -> bool {
        self.tickets.get(&unit_id).is_some_and(|t| *t == ticket)
    }
}
