//! Prometheus metrics for the check-in services.
//!
//! All metrics follow the naming convention: `iv_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ISSUANCE
    // =========================================================================

    /// Tokens minted and attached to an RSVP
    pub static ref TICKETS_ISSUED: IntCounter = IntCounter::new(
        "iv_tickets_issued_total",
        "Total number of tickets issued"
    ).expect("metric creation failed");

    /// Delivery hand-offs by result
    pub static ref DELIVERIES: IntCounterVec = IntCounterVec::new(
        Opts::new("iv_deliveries_total", "Ticket deliveries by result"),
        &["result"]  // success / failure
    ).expect("metric creation failed");

    // =========================================================================
    // CHECK-IN
    // =========================================================================

    /// Door scans by outcome
    pub static ref CHECKIN_SCANS: IntCounterVec = IntCounterVec::new(
        Opts::new("iv_checkin_scans_total", "Door scans by outcome"),
        &["outcome"]  // admitted / already_used / invalid
    ).expect("metric creation failed");

    /// Rejected scans by reason
    pub static ref CHECKIN_REJECTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("iv_checkin_rejections_total", "Rejected door scans by reason"),
        &["reason"]
    ).expect("metric creation failed");

    /// Time spent validating one scan
    pub static ref CHECKIN_SCAN_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "iv_checkin_scan_duration_seconds",
            "Time spent validating a scanned token"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid bucket layout"))
    ).expect("metric creation failed");
}

/// Handle proving the metrics were registered.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Fails if called twice.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TICKETS_ISSUED.clone()),
        Box::new(DELIVERIES.clone()),
        Box::new(CHECKIN_SCANS.clone()),
        Box::new(CHECKIN_REJECTIONS.clone()),
        Box::new(CHECKIN_SCAN_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
