//! Outcomes a stage handler hands back to the host.

use serde::Serialize;

use crate::processor::headers::AllHeaders;

/// What the host should do once a stage handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Proceed to the next stage, nothing mutated.
    Continue,
    /// Terminate the request and answer the client directly.
    Cancel(ImmediateResponse),
}

impl Action {
    pub fn is_continue(&self) -> bool {
        matches!(self, Action::Continue)
    }
}

/// Response sent to the client in place of the upstream one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImmediateResponse {
    /// HTTP status code.
    pub status: u16,
    /// Additional headers, always empty for rejections issued by this crate.
    #[serde(skip)]
    pub headers: AllHeaders,
    /// Response body: the status code's name, e.g. `BadRequest`.
    pub body: String,
    /// Human-readable reason recorded by the host for access logs.
    pub details: String,
}

impl ImmediateResponse {
    pub fn new(status: u16, headers: AllHeaders, details: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: status_code_name(status).to_string(),
            details: details.into(),
        }
    }
}

/// Name of an HTTP status code as spelled by the proxy's status enum.
///
/// Unknown codes map to an empty string.
pub fn status_code_name(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "NonAuthoritativeInformation",
        204 => "NoContent",
        205 => "ResetContent",
        206 => "PartialContent",
        207 => "MultiStatus",
        208 => "AlreadyReported",
        226 => "IMUsed",
        300 => "MultipleChoices",
        301 => "MovedPermanently",
        302 => "Found",
        303 => "SeeOther",
        304 => "NotModified",
        305 => "UseProxy",
        307 => "TemporaryRedirect",
        308 => "PermanentRedirect",
        400 => "BadRequest",
        401 => "Unauthorized",
        402 => "PaymentRequired",
        403 => "Forbidden",
        404 => "NotFound",
        405 => "MethodNotAllowed",
        406 => "NotAcceptable",
        407 => "ProxyAuthenticationRequired",
        408 => "RequestTimeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "LengthRequired",
        412 => "PreconditionFailed",
        413 => "PayloadTooLarge",
        414 => "URITooLong",
        415 => "UnsupportedMediaType",
        416 => "RangeNotSatisfiable",
        417 => "ExpectationFailed",
        421 => "MisdirectedRequest",
        422 => "UnprocessableEntity",
        423 => "Locked",
        424 => "FailedDependency",
        426 => "UpgradeRequired",
        428 => "PreconditionRequired",
        429 => "TooManyRequests",
        431 => "RequestHeaderFieldsTooLarge",
        500 => "InternalServerError",
        501 => "NotImplemented",
        502 => "BadGateway",
        503 => "ServiceUnavailable",
        504 => "GatewayTimeout",
        505 => "HTTPVersionNotSupported",
        506 => "VariantAlsoNegotiates",
        507 => "InsufficientStorage",
        508 => "LoopDetected",
        510 => "NotExtended",
        511 => "NetworkAuthenticationRequired",
        _ => "",
    }
}
