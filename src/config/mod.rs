//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → DelayConfig (validated, immutable)
//!     → processing options handed to RequestProcessor::init
//!     → observability settings handed to logging/metrics init
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No config file means defaults, not an error

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::DelayConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ProcessingOptions;
pub use schema::ProcessorConfig;
