//! Prometheus metrics for outbound bureau calls.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `bureau_requests_total` | Counter | `status_code`, `bureau_name` |
//! | `bureau_request_duration_seconds` | Histogram | `status_code`, `bureau_name` |
//!
//! Every family exported by [`MetricsRegistry`] also carries the constant
//! label `serviceName="credit-api"`, process collectors included.
//!
//! The registry is built once at process start and handed down as
//! [`SharedMetricsRegistry`]; nothing registers into it afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Value of the `serviceName` label attached to every exported metric.
pub const SERVICE_NAME: &str = "credit-api";

/// Histogram buckets for bureau latency (in seconds). Upstream calls range
/// from sub-second to the 60s gateway ceiling.
pub const BUREAU_DURATION_BUCKETS: &[f64] = &[
    0.1, 0.2, 0.3, 0.4, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0,
    55.0, 60.0,
];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to register metric: {0}")]
    RegistrationFailed(#[from] prometheus::Error),

    #[error("failed to encode metrics: {0}")]
    EncodingFailed(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

/// Counter and latency histogram for bureau requests.
///
/// Both vectors are internally synchronised; clones share the same series.
#[derive(Clone)]
pub struct BureauMetrics {
    requests_total: CounterVec,
    request_duration: HistogramVec,
}

impl BureauMetrics {
    /// Creates the bureau metrics and registers them with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> MetricsResult<Self> {
        let requests_total = CounterVec::new(
            Opts::new("bureau_requests_total", "Total of bureau requests"),
            &["status_code", "bureau_name"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "bureau_request_duration_seconds",
                "Duration of bureau requests",
            )
            .buckets(BUREAU_DURATION_BUCKETS.to_vec()),
            &["status_code", "bureau_name"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            requests_total,
            request_duration,
        })
    }

    /// Records one completed bureau call.
    ///
    /// # Arguments
    ///
    /// * `status_code` - HTTP status of the response, e.g. `"200"`
    /// * `bureau_name` - bureau identifier, e.g. `"receita_federal"`
    /// * `elapsed_secs` - time from send to response headers
    pub fn record(&self, status_code: &str, bureau_name: &str, elapsed_secs: f64) {
        self.request_duration
            .with_label_values(&[status_code, bureau_name])
            .observe(elapsed_secs);
        self.requests_total
            .with_label_values(&[status_code, bureau_name])
            .inc();
    }

    /// Returns the request count for a label pair. Primarily for tests.
    #[must_use]
    pub fn request_count(&self, status_code: &str, bureau_name: &str) -> f64 {
        self.requests_total
            .with_label_values(&[status_code, bureau_name])
            .get()
    }

    /// Returns how many latencies were observed for a label pair.
    #[must_use]
    pub fn duration_sample_count(&self, status_code: &str, bureau_name: &str) -> u64 {
        self.request_duration
            .with_label_values(&[status_code, bureau_name])
            .get_sample_count()
    }
}

/// Prometheus registry plus the service's registered metrics.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    bureau_metrics: BureauMetrics,
}

impl MetricsRegistry {
    /// Creates the registry and registers the bureau metrics and, on Linux,
    /// the process collector.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails.
    pub fn new() -> MetricsResult<Self> {
        let labels = HashMap::from([("serviceName".to_string(), SERVICE_NAME.to_string())]);
        let registry = Registry::new_custom(None, Some(labels))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        let bureau_metrics = BureauMetrics::new(&registry)?;
        Ok(Self {
            registry,
            bureau_metrics,
        })
    }

    #[must_use]
    pub const fn bureau_metrics(&self) -> &BureauMetrics {
        &self.bureau_metrics
    }

    /// Encodes all metrics in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode_text(&self) -> MetricsResult<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::EncodingFailed(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| MetricsError::EncodingFailed(e.to_string()))
    }

    #[must_use]
    pub const fn prometheus_registry(&self) -> &Registry {
        &self.registry
    }
}

pub type SharedMetricsRegistry = Arc<MetricsRegistry>;
