//! Metrics collection and exposition.
//!
//! # Metrics
//! - `delayed_return_stage_delay_seconds` (histogram): measured delay per stage
//! - `delayed_return_rejections_total` (counter): rejected requests by status
//! - `delayed_return_default_delay_total` (counter): requests without `delayed-time`

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::observability::ObservabilityError;
use crate::processor::Stage;

/// Install the Prometheus exporter listening on `address`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(address: &str) -> Result<(), ObservabilityError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| ObservabilityError::InvalidAddress(address.to_string()))?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_histogram!(
        "delayed_return_stage_delay_seconds",
        "Measured delay injected per processing stage"
    );
    describe_counter!(
        "delayed_return_rejections_total",
        "Requests rejected because of an invalid delayed-time header"
    );
    describe_counter!(
        "delayed_return_default_delay_total",
        "Requests that fell back to the default delay"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record the delay measured for one stage.
pub fn record_stage_delay(stage: Stage, elapsed: Duration) {
    histogram!("delayed_return_stage_delay_seconds", "stage" => stage.name())
        .record(elapsed.as_secs_f64());
}

/// Record a rejected request.
pub fn record_rejection(status: u16) {
    counter!("delayed_return_rejections_total", "status" => status.to_string()).increment(1);
}

/// Record a request that used the default delay.
pub fn record_default_delay() {
    counter!("delayed_return_default_delay_total").increment(1);
}
