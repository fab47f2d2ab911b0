//! Prometheus metrics for the gateway.

use crate::models::Modality;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls reuse the first handle.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if metrics::set_global_recorder(recorder).is_err() {
            tracing::warn!("A global metrics recorder was already installed");
        }
        handle
    })
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record the outcome and provider latency of one translation.
pub fn record_generation(modality: Modality, status: &'static str, latency: Option<Duration>) {
    counter!(
        "genai_requests_total",
        "modality" => modality.as_str(),
        "status" => status
    )
    .increment(1);

    if let Some(latency) = latency {
        histogram!("genai_provider_latency_seconds", "modality" => modality.as_str())
            .record(latency.as_secs_f64());
    }
}
