//! The delay-injecting request processor.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::{self, Duration, Instant};

use crate::config::ProcessingOptions;
use crate::delay::state::DelayState;
use crate::delay::value::{Delay, DELAYED_TIME_HEADER};
use crate::observability::metrics;
use crate::processor::{Action, AllHeaders, ProcessError, RequestContext, RequestProcessor, Stage};

/// Details attached to the rejection of a malformed `delayed-time` header.
pub const INVALID_HEADER_DETAILS: &str = "delayed-time header is invalid";

/// Sleeps for the request's `delayed-time` at every stage, then continues.
#[derive(Debug, Default)]
pub struct DelayProcessor {
    options: Option<ProcessingOptions>,
}

impl DelayProcessor {
    /// Registration name.
    pub const NAME: &'static str = "delayed-return";

    pub fn new() -> Self {
        Self::default()
    }

    async fn delay_stage(
        &self,
        ctx: &mut RequestContext<DelayState>,
        stage: Stage,
    ) -> Result<Action, ProcessError> {
        delay_and_log(ctx, stage).await?;
        Ok(ctx.continue_request())
    }
}

/// Sleep for the recorded delay and log how long the stage actually waited.
///
/// The sleep always runs to completion. Returns the measured elapsed time.
pub async fn delay_and_log(
    ctx: &RequestContext<DelayState>,
    stage: Stage,
) -> Result<Duration, ProcessError> {
    let delay = ctx
        .state()
        .delay()
        .ok_or(ProcessError::MissingDelayState { stage })?;

    let started = Instant::now();
    time::sleep(delay.as_duration()).await;
    let elapsed = started.elapsed();

    tracing::info!(
        request_id = %ctx.request_id(),
        stage = %stage,
        delayed_ms = delay.as_millis(),
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "Stage delayed"
    );
    metrics::record_stage_delay(stage, elapsed);

    Ok(elapsed)
}

#[async_trait]
impl RequestProcessor for DelayProcessor {
    type State = DelayState;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(
        &mut self,
        options: ProcessingOptions,
        non_flag_args: Vec<String>,
    ) -> Result<(), ProcessError> {
        tracing::debug!(options = ?options, args = ?non_flag_args, "Processor initialized");
        self.options = Some(options);
        Ok(())
    }

    fn options(&self) -> Option<&ProcessingOptions> {
        self.options.as_ref()
    }

    async fn process_request_headers(
        &self,
        ctx: &mut RequestContext<DelayState>,
        headers: &AllHeaders,
    ) -> Result<Action, ProcessError> {
        let delay = match headers.get(DELAYED_TIME_HEADER) {
            None => {
                tracing::info!(
                    request_id = %ctx.request_id(),
                    default_ms = Delay::DEFAULT.as_millis(),
                    "delayed-time header is not set, using default value"
                );
                metrics::record_default_delay();
                Delay::DEFAULT
            }
            Some(raw) => match Delay::parse(raw) {
                Ok(delay) => delay,
                Err(err) => {
                    let Some(status) = err.status() else {
                        return Err(err);
                    };
                    tracing::warn!(
                        request_id = %ctx.request_id(),
                        status,
                        error = %err,
                        "Rejecting request"
                    );
                    metrics::record_rejection(status);
                    return Ok(ctx.cancel_request(status, AllHeaders::new(), INVALID_HEADER_DETAILS));
                }
            },
        };

        ctx.state_mut().record(delay)?;
        self.delay_stage(ctx, Stage::RequestHeaders).await
    }

    async fn process_request_body(
        &self,
        ctx: &mut RequestContext<DelayState>,
        _body: &Bytes,
    ) -> Result<Action, ProcessError> {
        self.delay_stage(ctx, Stage::RequestBody).await
    }

    async fn process_request_trailers(
        &self,
        ctx: &mut RequestContext<DelayState>,
        _trailers: &AllHeaders,
    ) -> Result<Action, ProcessError> {
        self.delay_stage(ctx, Stage::RequestTrailers).await
    }

    async fn process_response_headers(
        &self,
        ctx: &mut RequestContext<DelayState>,
        _headers: &AllHeaders,
    ) -> Result<Action, ProcessError> {
        self.delay_stage(ctx, Stage::ResponseHeaders).await
    }

    async fn process_response_body(
        &self,
        ctx: &mut RequestContext<DelayState>,
        _body: &Bytes,
    ) -> Result<Action, ProcessError> {
        self.delay_stage(ctx, Stage::ResponseBody).await
    }

    async fn process_response_trailers(
        &self,
        ctx: &mut RequestContext<DelayState>,
        _trailers: &AllHeaders,
    ) -> Result<Action, ProcessError> {
        self.delay_stage(ctx, Stage::ResponseTrailers).await
    }
}
