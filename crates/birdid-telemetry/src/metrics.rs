//! Metric names and the recorder used by the identification endpoints

use std::time::Instant;

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

pub const IDENTIFICATION_COUNT: &str = "birdid.identification.count";
pub const UPSTREAM_DURATION: &str = "birdid.upstream.duration";

/// Instruments for identification requests
///
/// Backed by the global meter provider, so recording is a no-op until
/// telemetry export is configured.
#[derive(Clone)]
pub struct IdentificationMetrics {
    identifications: Counter<u64>,
    upstream_duration: Histogram<f64>,
}

impl IdentificationMetrics {
    pub fn new() -> Self {
        let meter = global::meter("birdid");

        Self {
            identifications: meter
                .u64_counter(IDENTIFICATION_COUNT)
                .with_description("Identification requests by path and outcome")
                .build(),
            upstream_duration: meter
                .f64_histogram(UPSTREAM_DURATION)
                .with_description("Duration of upstream AI calls")
                .with_unit("s")
                .build(),
        }
    }

    /// Count one finished request; `outcome` is `parsed`, `fallback` or an error type
    pub fn record_identification(&self, kind: &'static str, outcome: &'static str) {
        self.identifications
            .add(1, &[KeyValue::new("kind", kind), KeyValue::new("outcome", outcome)]);
    }

    /// Record how long a call to `service` took
    pub fn record_upstream(&self, service: &'static str, start: Instant) {
        self.upstream_duration
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("service", service)]);
    }
}

impl Default for IdentificationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
