//! Stage-handler capability consumed by the host pipeline.
//!
//! # Data Flow
//! ```text
//! host opens request
//!     → context.rs (RequestContext<S>, one per request)
//!     → RequestProcessor::process_request_headers
//!     → RequestProcessor::process_{request,response}_{body,trailers,headers}
//!     → action.rs (Continue / Cancel(ImmediateResponse))
//! host drops context
//! ```
//!
//! # Design Decisions
//! - Stages of one request are strictly sequential; handlers take the
//!   context by `&mut` and the processor by `&self`
//! - Per-request state is a typed associated type, never a dynamic map
//! - Client-caused failures become `Action::Cancel`; contract violations are `Err`

pub mod action;
pub mod context;
pub mod error;
pub mod headers;
pub mod stage;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::ProcessingOptions;

pub use action::{Action, ImmediateResponse};
pub use context::RequestContext;
pub use error::ProcessError;
pub use headers::AllHeaders;
pub use stage::Stage;

/// A filter invoked by the host at each stage of a request.
#[async_trait]
pub trait RequestProcessor: Send + Sync + 'static {
    /// Per-request state, created fresh for every request.
    type State: Default + Send;

    /// Identifier the host uses to select this processor.
    fn name(&self) -> &'static str;

    /// Receive processor-wide options and leftover startup arguments.
    fn init(
        &mut self,
        options: ProcessingOptions,
        non_flag_args: Vec<String>,
    ) -> Result<(), ProcessError>;

    /// Options stored by `init`, if it ran.
    fn options(&self) -> Option<&ProcessingOptions>;

    /// Release resources at host shutdown.
    fn finish(&self) {}

    async fn process_request_headers(
        &self,
        ctx: &mut RequestContext<Self::State>,
        headers: &AllHeaders,
    ) -> Result<Action, ProcessError>;

    async fn process_request_body(
        &self,
        ctx: &mut RequestContext<Self::State>,
        body: &Bytes,
    ) -> Result<Action, ProcessError>;

    async fn process_request_trailers(
        &self,
        ctx: &mut RequestContext<Self::State>,
        trailers: &AllHeaders,
    ) -> Result<Action, ProcessError>;

    async fn process_response_headers(
        &self,
        ctx: &mut RequestContext<Self::State>,
        headers: &AllHeaders,
    ) -> Result<Action, ProcessError>;

    async fn process_response_body(
        &self,
        ctx: &mut RequestContext<Self::State>,
        body: &Bytes,
    ) -> Result<Action, ProcessError>;

    async fn process_response_trailers(
        &self,
        ctx: &mut RequestContext<Self::State>,
        trailers: &AllHeaders,
    ) -> Result<Action, ProcessError>;
}
