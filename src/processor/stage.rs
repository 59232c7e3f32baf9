//! Processing stages of a single request/response exchange.

use std::fmt;
use serde::Serialize;

/// One of the six points at which the host invokes a processor.
///
/// Serializes as the callback name, matching the log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    #[serde(rename = "ProcessRequestHeaders")]
    RequestHeaders,
    #[serde(rename = "ProcessRequestBody")]
    RequestBody,
    #[serde(rename = "ProcessRequestTrailers")]
    RequestTrailers,
    #[serde(rename = "ProcessResponseHeaders")]
    ResponseHeaders,
    #[serde(rename = "ProcessResponseBody")]
    ResponseBody,
    #[serde(rename = "ProcessResponseTrailers")]
    ResponseTrailers,
}

impl Stage {
    /// All stages in the order the host drives them.
    pub const ALL: [Stage; 6] = [
        Stage::RequestHeaders,
        Stage::RequestBody,
        Stage::RequestTrailers,
        Stage::ResponseHeaders,
        Stage::ResponseBody,
        Stage::ResponseTrailers,
    ];

    /// Name of the callback handling this stage, as it appears in logs.
    pub fn name(self) -> &'static str {
        match self {
            Stage::RequestHeaders => "ProcessRequestHeaders",
            Stage::RequestBody => "ProcessRequestBody",
            Stage::RequestTrailers => "ProcessRequestTrailers",
            Stage::ResponseHeaders => "ProcessResponseHeaders",
            Stage::ResponseBody => "ProcessResponseBody",
            Stage::ResponseTrailers => "ProcessResponseTrailers",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
