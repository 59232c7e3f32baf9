//! Errors raised by stage handlers.

use thiserror::Error;

use crate::processor::stage::Stage;

/// Error type for stage handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The `delayed-time` header is not a non-negative base-10 integer.
    #[error("delayed-time header is invalid: {value:?}")]
    InvalidDelayHeader { value: String },

    /// A stage ran before the request-headers stage recorded the delay.
    #[error("{stage} invoked before the delay was recorded")]
    MissingDelayState { stage: Stage },

    /// The request-headers stage ran a second time for the same request.
    #[error("delay already recorded for this request")]
    DelayAlreadyRecorded,
}

impl ProcessError {
    /// Status code to reject the request with, for client-caused errors.
    ///
    /// Internal errors return `None`: they signal a host contract violation
    /// and must not be turned into a client response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProcessError::InvalidDelayHeader { .. } => Some(400),
            ProcessError::MissingDelayState { .. } | ProcessError::DelayAlreadyRecorded => None,
        }
    }
}
