//! Optional Prometheus request metrics exposed on `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::Registry;

/// Build the request metrics middleware on a fresh registry.
///
/// # Errors
/// Returns [`std::io::Error`] when the default collectors cannot be
/// registered.
pub(crate) fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("fresque")
        .registry(Registry::new())
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("prometheus metrics setup failed: {err}")))
}
