// Telemetry module for structured logging and metrics

use anyhow::Result;
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging with environment-based filtering
///
/// `RUST_LOG` takes precedence; `default_directives` is used when it is
/// unset or unparsable.
pub fn init_logging(default_directives: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(env_filter))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    Ok(())
}

/// Install the Prometheus metrics recorder and describe the probe metrics
///
/// The returned handle renders the exposition text for the metrics
/// endpoint.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_counter!(
        "readiness_probe_success_total",
        "Total number of successful dependency readiness probes"
    );
    describe_counter!(
        "readiness_probe_failure_total",
        "Total number of failed dependency readiness probes"
    );

    Ok(handle)
}
