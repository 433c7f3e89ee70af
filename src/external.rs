use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::model::{DayRange, Eur};

/// One calendar day as reported by the external channel. Valid only for the
/// lifetime of the resolution call that fetched it; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayQuote {
    pub date: NaiveDate,
    pub available: bool,
    pub price: Eur,
    /// Provider-supplied explanation for a blocked day, if any.
    pub reason: Option<String>,
}

#[derive(Debug)]
pub enum ExternalError {
    /// Transport-level failure talking to the channel.
    Unreachable(String),
    /// The fetch did not answer within the allotted milliseconds.
    Timeout(u64),
}

impl std::fmt::Display for ExternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalError::Unreachable(e) => write!(f, "external channel unreachable: {e}"),
            ExternalError::Timeout(ms) => write!(f, "external channel timed out after {ms}ms"),
        }
    }
}

impl std::error::Error for ExternalError {}

/// Async feed of per-day availability and pricing from the marketplace
/// channel that may independently sell the same unit's dates.
#[async_trait]
pub trait ExternalSource: Send + Sync {
    /// Quote every day in `range`. Days may come back in any order and with
    /// gaps; callers index the result by date, never by position.
    async fn fetch_range(
        &self,
        unit_id: Ulid,
        range: DayRange,
    ) -> Result<Vec<DayQuote>, ExternalError>;
}

/// Channel feed backed by a fixed table: a nightly rate with weekend and
/// holiday surcharges, plus an explicit set of already-sold days. Fully
/// deterministic, so tests and benches lean on it; production embedders
/// supply their own `ExternalSource`.
pub struct StaticChannel {
    pub nightly_rate: Eur,
    pub weekend_surcharge: Eur,
    pub holiday_surcharge: Eur,
    pub holidays: HashSet<NaiveDate>,
    /// Already-sold days, each with an optional provider reason.
    pub sold: HashMap<NaiveDate, Option<String>>,
    /// Simulated round-trip delay before answering.
    pub latency: Option<Duration>,
}

impl StaticChannel {
    /// Seasonal channel: weekends cost 30 more, holidays 50 more.
    pub fn new(nightly_rate: Eur) -> Self {
        Self {
            nightly_rate,
            weekend_surcharge: 30.0,
            holiday_surcharge: 50.0,
            holidays: HashSet::new(),
            sold: HashMap::new(),
            latency: None,
        }
    }

    /// Same rate every day of the year.
    pub fn flat(nightly_rate: Eur) -> Self {
        Self {
            weekend_surcharge: 0.0,
            holiday_surcharge: 0.0,
            ..Self::new(nightly_rate)
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn quote(&self, date: NaiveDate) -> DayQuote {
        if let Some(reason) = self.sold.get(&date) {
            return DayQuote {
                date,
                available: false,
                price: self.nightly_rate,
                reason: reason.clone(),
            };
        }
        let mut price = self.nightly_rate;
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            price += self.weekend_surcharge;
        }
        if self.holidays.contains(&date) {
            price += self.holiday_surcharge;
        }
        DayQuote {
            date,
            available: true,
            price,
            reason: None,
        }
    }
}

#[async_trait]
impl ExternalSource for StaticChannel {
    async fn fetch_range(
        &self,
        _unit_id: Ulid,
        range: DayRange,
    ) -> Result<Vec<DayQuote>, ExternalError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(range.days().map(|date| self.quote(date)).collect())
    }
}
