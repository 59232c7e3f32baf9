//! Per-request processing reports.

use serde::Serialize;
use tokio::time::Duration;

use crate::processor::{ImmediateResponse, Stage};

/// Timing of one stage invocation, measured by the host.
#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub elapsed_ms: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl StageRecord {
    pub fn new(stage: Stage, elapsed: Duration) -> Self {
        Self {
            stage,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            elapsed,
        }
    }
}

/// How a request left the pipeline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every delivered stage continued.
    Completed,
    /// A stage cancelled the request with an immediate response.
    Rejected(ImmediateResponse),
}

/// Summary of one request's trip through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct StreamReport {
    pub request_id: String,
    pub stages: Vec<StageRecord>,
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Events not delivered because the request was rejected.
    pub skipped: usize,
}

impl StreamReport {
    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    /// Sum of the measured stage times.
    pub fn total_elapsed(&self) -> Duration {
        self.stages.iter().map(|s| s.elapsed).sum()
    }
}
