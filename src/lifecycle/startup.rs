//! Startup orchestration.
//!
//! Selects the processor named in the configuration, runs its init hook with
//! the processor-wide options and leftover arguments, and wraps it in a
//! pipeline. Any startup error is fatal.

use thiserror::Error;

use crate::config::DelayConfig;
use crate::delay::DelayProcessor;
use crate::pipeline::Pipeline;
use crate::processor::{ProcessError, RequestProcessor};

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("unknown processor {requested:?}, available: {available}")]
    UnknownProcessor {
        requested: String,
        available: &'static str,
    },

    #[error("processor init failed: {0}")]
    Init(#[from] ProcessError),
}

/// Build a ready-to-use pipeline from configuration.
pub fn start(
    config: &DelayConfig,
    non_flag_args: Vec<String>,
) -> Result<Pipeline<DelayProcessor>, StartupError> {
    if config.processor.name != DelayProcessor::NAME {
        return Err(StartupError::UnknownProcessor {
            requested: config.processor.name.clone(),
            available: DelayProcessor::NAME,
        });
    }

    let mut processor = DelayProcessor::new();
    processor.init(config.processing.clone(), non_flag_args)?;

    tracing::info!(
        processor = processor.name(),
        log_stream = config.processing.log_stream,
        log_phases = config.processing.log_phases,
        "Processor registered"
    );

    Ok(Pipeline::new(processor))
}
