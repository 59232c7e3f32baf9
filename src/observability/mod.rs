//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Stage handlers and pipeline produce:
//!     → logging.rs (structured log events keyed by request_id and stage)
//!     → metrics.rs (stage delay histogram, rejection and default counters)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines; stdout is left to the runner's reports)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID appears on every log line of a request
//! - Metric recording is a no-op until a recorder is installed

pub mod logging;
pub mod metrics;

use thiserror::Error;

/// Error raised while installing the logging subscriber or metrics exporter.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid metrics address {0:?}")]
    InvalidAddress(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}
