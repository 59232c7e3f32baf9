//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Select processor → init(options, args) → Pipeline
//!
//! Shutdown:
//!     Pipeline::finish → RequestProcessor::finish
//! ```
//!
//! # Design Decisions
//! - Fail fast: an unknown processor name is fatal
//! - The processor receives options only through `init`, never a global

pub mod startup;

pub use startup::{start, StartupError};
