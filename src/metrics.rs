use std::sync::OnceLock;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::RiskTier;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one recorder can be global per process, so later calls return the
/// handle of the first.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE.get_or_init(install).clone()
}

fn install() -> PrometheusHandle {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::warn!("Another metrics recorder is already installed");
        return handle;
    }

    // Pre-register counters so they appear even before the first increment.
    for tier in RiskTier::ALL {
        counter!("assessments_total", "tier" => tier.as_str()).absolute(0);
    }
    for kind in ["encoding", "scaler_mismatch", "shape", "classifier"] {
        counter!("assessment_failures_total", "kind" => kind).absolute(0);
    }

    // Histogram is lazily created on first record; force creation.
    histogram!("assessment_latency_seconds").record(0.0);

    handle
}

pub fn record_ensemble_size(models: usize) {
    gauge!("ensemble_models").set(models as f64);
}
