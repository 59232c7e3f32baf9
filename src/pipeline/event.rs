//! Stage events delivered by the host, one per callback invocation.

use bytes::Bytes;

use crate::processor::{Action, AllHeaders, ProcessError, RequestContext, RequestProcessor, Stage};

/// A stage invocation together with its payload.
#[derive(Debug, Clone)]
pub enum StageEvent {
    RequestHeaders(AllHeaders),
    RequestBody(Bytes),
    RequestTrailers(AllHeaders),
    ResponseHeaders(AllHeaders),
    ResponseBody(Bytes),
    ResponseTrailers(AllHeaders),
}

impl StageEvent {
    pub fn stage(&self) -> Stage {
        match self {
            StageEvent::RequestHeaders(_) => Stage::RequestHeaders,
            StageEvent::RequestBody(_) => Stage::RequestBody,
            StageEvent::RequestTrailers(_) => Stage::RequestTrailers,
            StageEvent::ResponseHeaders(_) => Stage::ResponseHeaders,
            StageEvent::ResponseBody(_) => Stage::ResponseBody,
            StageEvent::ResponseTrailers(_) => Stage::ResponseTrailers,
        }
    }

    /// The six events of a complete exchange, in host order.
    ///
    /// The response echoes `body`; trailers and response headers are empty.
    pub fn exchange(request_headers: AllHeaders, body: Bytes) -> Vec<StageEvent> {
        vec![
            StageEvent::RequestHeaders(request_headers),
            StageEvent::RequestBody(body.clone()),
            StageEvent::RequestTrailers(AllHeaders::new()),
            StageEvent::ResponseHeaders(AllHeaders::new()),
            StageEvent::ResponseBody(body),
            StageEvent::ResponseTrailers(AllHeaders::new()),
        ]
    }

    /// Request headers, when this is the request-headers event.
    pub fn request_headers(&self) -> Option<&AllHeaders> {
        match self {
            StageEvent::RequestHeaders(headers) => Some(headers),
            _ => None,
        }
    }
}

/// Route an event to the matching stage handler.
pub async fn dispatch<P: RequestProcessor>(
    processor: &P,
    ctx: &mut RequestContext<P::State>,
    event: &StageEvent,
) -> Result<Action, ProcessError> {
    match event {
        StageEvent::RequestHeaders(headers) => processor.process_request_headers(ctx, headers).await,
        StageEvent::RequestBody(body) => processor.process_request_body(ctx, body).await,
        StageEvent::RequestTrailers(trailers) => processor.process_request_trailers(ctx, trailers).await,
        StageEvent::ResponseHeaders(headers) => processor.process_response_headers(ctx, headers).await,
        StageEvent::ResponseBody(body) => processor.process_response_body(ctx, body).await,
        StageEvent::ResponseTrailers(trailers) => processor.process_response_trailers(ctx, trailers).await,
    }
}
