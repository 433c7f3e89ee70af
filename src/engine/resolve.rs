use std::collections::HashMap;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::external::{DayQuote, ExternalError, ExternalSource};
use crate::model::{
    BlockSource, DayRange, Eur, Verdict, REASON_CHANNEL_BOOKED, REASON_MARKED_UNAVAILABLE,
    REASON_PLATFORM_BOOKED,
};
use crate::observability;
use crate::store::RecordStore;

use super::conflict::{range_conflicts, validate_guest_count, validate_range};
use super::queries::{local_day_price, override_index};
use super::{Engine, EngineError, LastResolution};

impl Engine {
    /// Decide whether `[check_in, check_out)` can be booked and what it
    /// costs.
    ///
    /// Sources are consulted in priority order: confirmed platform bookings
    /// first, then per-day overrides, then the external channel. The first
    /// blocking day wins. A failed or timed-out channel fetch degrades
    /// pricing to override/base rates; it never blocks dates the local steps
    /// left open.
    ///
    /// Each call supersedes any in-flight resolution for the same unit: a
    /// call overtaken while awaiting the channel returns
    /// [`EngineError::Superseded`] and records nothing.
    pub async fn resolve(
        &self,
        unit_id: Ulid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest_count: u32,
    ) -> Result<Verdict, EngineError> {
        let range = validate_range(check_in, check_out)?;
        validate_guest_count(&self.config, guest_count)?;

        let ticket = self.issue_ticket(unit_id);
        let start = Instant::now();

        let verdict = self.decide(unit_id, range, guest_count).await;

        // A newer request may have started while the channel fetch was in
        // flight; its verdict must not be overwritten by this one.
        if !self.is_current(unit_id, ticket) {
            metrics::counter!(observability::RESOLUTIONS_SUPERSEDED_TOTAL).increment(1);
            return Err(EngineError::Superseded);
        }
        self.latest.insert(
            unit_id,
            LastResolution {
                range,
                guest_count,
                verdict: verdict.clone(),
            },
        );

        metrics::counter!(observability::RESOLUTIONS_TOTAL).increment(1);
        metrics::histogram!(observability::RESOLUTION_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());
        debug!(
            %unit_id,
            available = verdict.available,
            total = verdict.total_price,
            "stay resolved"
        );
        Ok(verdict)
    }

    async fn decide(&self, unit_id: Ulid, range: DayRange, guest_count: u32) -> Verdict {
        // Confirmed platform bookings are authoritative; no other source can
        // reopen a day they cover.
        let bookings = self.store.list_bookings(unit_id);
        if range_conflicts(&bookings, &range) {
            return Verdict::blocked(BlockSource::LocalBooking, REASON_PLATFORM_BOOKED);
        }

        // Overrides are purely local, so they are checked before paying
        // for a network round-trip.
        let overrides = override_index(self.store.list_overrides(unit_id));
        for day in range.days() {
            if let Some(rule) = overrides.get(&day)
                && !rule.available
            {
                return Verdict::blocked(BlockSource::LocalOverride, REASON_MARKED_UNAVAILABLE);
            }
        }

        // External channel. Quotes may arrive out of order or with gaps, so
        // they are indexed by day; a day the channel never mentioned is
        // priced from local rules and never blocks.
        let fetched = match tokio::time::timeout(
            self.fetch_timeout,
            self.external.fetch_range(unit_id, range),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ExternalError::Timeout(self.fetch_timeout.as_millis() as u64)),
        };

        let nightly_total: Eur = match fetched {
            Ok(quotes) => {
                let mut by_day: HashMap<NaiveDate, DayQuote> = HashMap::new();
                for quote in quotes {
                    by_day.entry(quote.date).or_insert(quote);
                }
                let mut total = 0.0;
                for day in range.days() {
                    match by_day.get(&day) {
                        Some(quote) if !quote.available => {
                            let reason = quote
                                .reason
                                .clone()
                                .unwrap_or_else(|| REASON_CHANNEL_BOOKED.to_string());
                            return Verdict::blocked(BlockSource::External, reason);
                        }
                        Some(quote) => total += quote.price,
                        None => total += local_day_price(&overrides, day, self.config.base_price),
                    }
                }
                total
            }
            Err(err) => {
                // Best-effort pricing only: local blocking already ran, so
                // the fallback never flips availability.
                warn!(%unit_id, %err, "external channel fetch failed, pricing locally");
                metrics::counter!(observability::EXTERNAL_FAILURES_TOTAL).increment(1);
                range
                    .days()
                    .map(|day| local_day_price(&overrides, day, self.config.base_price))
                    .sum()
            }
        };

        Verdict::open(nightly_total + self.surcharge(guest_count, range.nights()))
    }

    /// Extra-occupant charge on top of the nightly total, independent of
    /// which source priced the nights.
    fn surcharge(&self, guest_count: u32, nights: u32) -> Eur {
        if guest_count <= self.config.base_occupancy {
            return 0.0;
        }
        Eur::from(guest_count - self.config.base_occupancy)
            * self.config.extra_guest_fee
            * Eur::from(nights)
    }
}
