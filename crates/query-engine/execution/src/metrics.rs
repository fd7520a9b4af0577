//! Metrics setup and update for the connector.

use prometheus::core::{AtomicU64, GenericCounter};

/// The counters the connector exposes.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub query_errors_total: GenericCounter<AtomicU64>,
}

impl Metrics {
    /// Set up the counters used to produce Prometheus metrics.
    pub fn initialize(
        metrics_registry: &mut prometheus::Registry,
    ) -> Result<Metrics, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "litegate_query_total",
            "Total successful queries.",
        )?;

        let query_errors_total = add_int_counter_metric(
            metrics_registry,
            "litegate_query_errors_total",
            "Total queries answered with an error.",
        )?;

        Ok(Metrics {
            query_total,
            query_errors_total,
        })
    }
}

/// Create a new int counter metric and register it with the provided
/// Prometheus Registry.
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}
