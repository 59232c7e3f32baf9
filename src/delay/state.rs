//! Per-request state kept by the delay processor.

use crate::delay::value::Delay;
use crate::processor::ProcessError;

/// Delay recorded at the request-headers stage, readable by later stages.
///
/// Write-once: the value cannot change after it has been recorded.
#[derive(Debug, Default)]
pub struct DelayState {
    delay: Option<Delay>,
}

impl DelayState {
    /// Record the delay for this request.
    pub fn record(&mut self, delay: Delay) -> Result<(), ProcessError> {
        if self.delay.is_some() {
            return Err(ProcessError::DelayAlreadyRecorded);
        }
        self.delay = Some(delay);
        Ok(())
    }

    /// The recorded delay, if the request-headers stage has run.
    pub fn delay(&self) -> Option<Delay> {
        self.delay
    }
}
