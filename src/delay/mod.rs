//! Latency injection.
//!
//! # Data Flow
//! ```text
//! request headers
//!     → value.rs (parse `delayed-time`, default 100 ms, reject invalid)
//!     → state.rs (record the delay once per request)
//!     → processor.rs (sleep + log at this and every later stage)
//! ```
//!
//! # Design Decisions
//! - The delay is validated before it is ever slept on
//! - Payloads are never inspected or mutated
//! - Every stage shares one delay routine, parameterised by stage

pub mod processor;
pub mod state;
pub mod value;

pub use processor::{delay_and_log, DelayProcessor, INVALID_HEADER_DETAILS};
pub use state::DelayState;
pub use value::{Delay, DELAYED_TIME_HEADER};
