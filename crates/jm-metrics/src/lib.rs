use std::env;
use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Starts the Prometheus exporter on `0.0.0.0:<port>`, the port coming from
/// `port_env` or `default_port`. Later calls return the running handle.
pub fn init_metrics(port_env: &str, default_port: u16) -> Option<&'static PrometheusHandle> {
    if let Some(existing) = PROMETHEUS_HANDLE.get() {
        return Some(existing);
    }

    let port = env::var(port_env)
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(default_port);

    match PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install_recorder()
    {
        Ok(handle) => {
            let _ = PROMETHEUS_HANDLE.set(handle);
            info!(metrics_port = port, "started prometheus exporter");
            PROMETHEUS_HANDLE.get()
        }
        Err(err) => {
            warn!(error = %err, metrics_port = port, "failed to start prometheus exporter");
            PROMETHEUS_HANDLE.get()
        }
    }
}

/// One ranking call: how many jobs were scored and how many were returned.
pub fn record_ranking(profile: &'static str, scored: usize, returned: usize) {
    counter!("jm_rankings_total", "profile" => profile).increment(1);
    histogram!("jm_ranking_jobs_scored", "profile" => profile).record(scored as f64);
    histogram!("jm_ranking_jobs_returned", "profile" => profile).record(returned as f64);
}

pub fn record_notifications(planned: usize, live: usize) {
    counter!("jm_notifications_planned_total").increment(planned as u64);
    counter!("jm_notifications_live_total").increment(live as u64);
}
