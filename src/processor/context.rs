//! Per-request context handed to every stage of one request.

use tokio::time::{Duration, Instant};

use crate::processor::action::{Action, ImmediateResponse};
use crate::processor::headers::AllHeaders;
use crate::processor::stage::Stage;

/// State scoped to a single request, created and dropped by the host.
///
/// `S` is the processor's own typed state; the host only ever creates it
/// through `Default` and never looks inside.
#[derive(Debug)]
pub struct RequestContext<S> {
    request_id: String,
    started_at: Instant,
    stage: Option<Stage>,
    state: S,
}

impl<S: Default> RequestContext<S> {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            started_at: Instant::now(),
            stage: None,
            state: S::default(),
        }
    }
}

impl<S> RequestContext<S> {
    /// Identifier used to correlate log lines of this request.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Stage currently being processed, `None` before the first one.
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub(crate) fn enter(&mut self, stage: Stage) {
        self.stage = Some(stage);
    }

    /// Time since the host opened this request.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Let the host advance to the next stage unchanged.
    pub fn continue_request(&self) -> Action {
        Action::Continue
    }

    /// Terminate the request with an immediate response.
    pub fn cancel_request(
        &self,
        status: u16,
        headers: AllHeaders,
        details: impl Into<String>,
    ) -> Action {
        Action::Cancel(ImmediateResponse::new(status, headers, details))
    }
}
