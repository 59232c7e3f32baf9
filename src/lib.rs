//! Latency-injection processor for a proxy's external processing pipeline.
//!
//! Delays every stage of a request/response exchange by the number of
//! milliseconds given in the request's `delayed-time` header.

pub mod config;
pub mod delay;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod processor;

pub use config::DelayConfig;
pub use delay::DelayProcessor;
pub use pipeline::Pipeline;
pub use processor::RequestProcessor;
