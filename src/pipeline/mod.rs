//! In-process stage driver.
//!
//! Plays the host's part of the callback contract so a processor can be
//! exercised end to end without a proxy or a wire protocol.
//!
//! # Data Flow
//! ```text
//! Vec<StageEvent> (one request)
//!     → new RequestContext (request id from x-request-id, else UUID v4)
//!     → event.rs dispatch (StageEvent → stage handler)
//!     → Action::Continue → next event
//!     → Action::Cancel   → stop, remaining events skipped
//!     → report.rs (StreamReport)
//! ```
//!
//! # Design Decisions
//! - Stages of a request run strictly in order inside one task
//! - Requests are isolated: each gets its own context and its own task
//! - Handler errors abort the request; they are never turned into responses
//! - In `process_many`, the first error aborts every request still running

pub mod event;
pub mod report;

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::ProcessingOptions;
use crate::processor::{Action, ProcessError, RequestContext, RequestProcessor, Stage};

pub use event::{dispatch, StageEvent};
pub use report::{Outcome, StageRecord, StreamReport};

/// Header the host uses to correlate a request.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Error type for the pipeline driver.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("request carried no stage events")]
    EmptyStream,

    #[error("request {request_id}: {source}")]
    Processor {
        request_id: String,
        #[source]
        source: ProcessError,
    },

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Drives requests through a processor's stage handlers.
pub struct Pipeline<P> {
    processor: Arc<P>,
    options: ProcessingOptions,
}

impl<P> Clone for Pipeline<P> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
            options: self.options.clone(),
        }
    }
}

impl<P: RequestProcessor> Pipeline<P> {
    /// Wrap an initialized processor.
    ///
    /// Uses the options the processor stored during `init`, or defaults.
    pub fn new(processor: P) -> Self {
        let options = processor.options().cloned().unwrap_or_default();
        Self {
            processor: Arc::new(processor),
            options,
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Run one request's events in order.
    pub async fn process(&self, events: Vec<StageEvent>) -> Result<StreamReport, PipelineError> {
        let Some(first) = events.first() else {
            return Err(PipelineError::EmptyStream);
        };

        let request_id = first
            .request_headers()
            .and_then(|headers| headers.get_str(X_REQUEST_ID))
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut ctx: RequestContext<P::State> = RequestContext::new(request_id);
        if self.options.log_stream {
            tracing::debug!(request_id = %ctx.request_id(), processor = self.processor.name(), "Stream opened");
        }

        let total = events.len();
        let mut stages = Vec::with_capacity(total);
        let mut outcome = Outcome::Completed;
        let mut skipped = 0;

        for (index, event) in events.iter().enumerate() {
            let stage = event.stage();
            ctx.enter(stage);

            let started = Instant::now();
            let action = dispatch(self.processor.as_ref(), &mut ctx, event)
                .await
                .map_err(|source| PipelineError::Processor {
                    request_id: ctx.request_id().to_string(),
                    source,
                })?;
            let record = StageRecord::new(stage, started.elapsed());

            if self.options.log_phases {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    stage = %stage,
                    elapsed_ms = record.elapsed_ms,
                    "Phase complete"
                );
            }
            stages.push(record);

            if let Action::Cancel(response) = action {
                outcome = Outcome::Rejected(response);
                skipped = total - index - 1;
                break;
            }
        }

        if self.options.log_stream {
            tracing::debug!(
                request_id = %ctx.request_id(),
                last_stage = %ctx.stage().map_or("none", Stage::name),
                elapsed_ms = u64::try_from(ctx.elapsed().as_millis()).unwrap_or(u64::MAX),
                "Stream closed"
            );
        }

        Ok(StreamReport {
            request_id: ctx.request_id().to_string(),
            stages,
            outcome,
            skipped,
        })
    }

    /// Run several requests concurrently, one task each.
    ///
    /// Reports come back in input order. The first failing request aborts
    /// every request still in flight.
    pub async fn process_many(
        &self,
        requests: Vec<Vec<StageEvent>>,
    ) -> Result<Vec<StreamReport>, PipelineError> {
        let mut tasks = JoinSet::new();
        let mut reports: Vec<Option<StreamReport>> = Vec::with_capacity(requests.len());

        for (index, events) in requests.into_iter().enumerate() {
            let pipeline = self.clone();
            tasks.spawn(async move { (index, pipeline.process(events).await) });
            reports.push(None);
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined?;
            match result {
                Ok(report) => reports[index] = Some(report),
                Err(err) => {
                    tasks.abort_all();
                    return Err(err);
                }
            }
        }

        Ok(reports.into_iter().flatten().collect())
    }

    /// Run the processor's shutdown hook.
    pub fn finish(&self) {
        self.processor.finish();
    }
}
