use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

use crate::{Result, ServerError};

lazy_static! {
    pub static ref TRANSFER_CALLS: IntCounter =
        IntCounter::new("transfer_calls", "Raw file downloads").unwrap();
    pub static ref TRANSFER_FAILURES: IntCounter =
        IntCounter::new("transfer_failures", "Failed raw file downloads").unwrap();
    pub static ref SYNC_RUNS: IntCounter =
        IntCounter::new("sync_runs", "Push events applied to the target folder").unwrap();
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError {
            message: e.to_string(),
        })?;

    setup_process_metrics(&prometheus)?;

    for counter in [&*TRANSFER_CALLS, &*TRANSFER_FAILURES, &*SYNC_RUNS] {
        register(&prometheus, Box::new(counter.clone()))?;
    }

    Ok(prometheus)
}

fn register(
    metrics: &PrometheusMetrics,
    collector: Box<dyn prometheus::core::Collector>,
) -> Result<()> {
    metrics
        .registry
        .register(collector)
        .map_err(|e| ServerError::MetricsError {
            message: e.to_string(),
        })
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    register(metrics, Box::new(ProcessCollector::for_self()))
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    Ok(())
}
