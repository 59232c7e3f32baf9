//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the delayed-return runner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DelayConfig {
    /// Processor selection.
    pub processor: ProcessorConfig,

    /// Processor-wide options handed to `RequestProcessor::init`.
    pub processing: ProcessingOptions,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Which processor the host should register.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Processor name, matched against `RequestProcessor::name`.
    pub name: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            name: "delayed-return".to_string(),
        }
    }
}

/// Processor-wide options.
///
/// Opaque to the processor itself: it stores them and never validates them.
/// The pipeline driver reads them to decide what to log.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Log when a request stream opens and closes.
    pub log_stream: bool,

    /// Log every phase with its elapsed time.
    pub log_phases: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// One JSON object per line for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
