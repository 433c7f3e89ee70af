use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: resolutions that completed and recorded a verdict.
pub const RESOLUTIONS_TOTAL: &str = "feriendirekt_resolutions_total";

/// Histogram: resolution latency in seconds, external fetch included.
pub const RESOLUTION_DURATION_SECONDS: &str = "feriendirekt_resolution_duration_seconds";

/// Counter: resolutions discarded because a newer request overtook them.
pub const RESOLUTIONS_SUPERSEDED_TOTAL: &str = "feriendirekt_resolutions_superseded_total";

/// Counter: external-channel fetches that failed or timed out and fell back
/// to local pricing.
pub const EXTERNAL_FAILURES_TOTAL: &str = "feriendirekt_external_failures_total";

/// Counter: booking requests accepted and persisted as pending.
pub const BOOKINGS_SUBMITTED_TOTAL: &str = "feriendirekt_bookings_submitted_total";

/// Counter: administrative approve/reject decisions applied.
pub const BOOKINGS_DECIDED_TOTAL: &str = "feriendirekt_bookings_decided_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
