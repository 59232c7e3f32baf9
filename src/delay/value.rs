//! The delay value and its header parsing.

use serde::Serialize;
use tokio::time::Duration;

use crate::processor::ProcessError;

/// Header carrying the requested delay in milliseconds.
pub const DELAYED_TIME_HEADER: &str = "delayed-time";

/// A validated, non-negative delay in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Delay(u64);

impl Delay {
    /// Delay applied when the request carries no `delayed-time` header.
    pub const DEFAULT: Delay = Delay(100);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Parse a raw `delayed-time` header value.
    ///
    /// Accepts a base-10 signed 64-bit integer with an optional sign and no
    /// surrounding whitespace. Negative values are rejected.
    pub fn parse(raw: &[u8]) -> Result<Self, ProcessError> {
        let invalid = || ProcessError::InvalidDelayHeader {
            value: String::from_utf8_lossy(raw).into_owned(),
        };

        let text = std::str::from_utf8(raw).map_err(|_| invalid())?;
        let millis: i64 = text.parse().map_err(|_| invalid())?;
        u64::try_from(millis).map(Delay).map_err(|_| invalid())
    }
}
