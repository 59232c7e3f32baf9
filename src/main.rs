//! delayed-return local runner.
//!
//! Drives simulated requests through the delay processor in-process and
//! prints one JSON report per request. Useful for checking a configuration
//! and a `delayed-time` value before pointing a proxy at the processor.
//!
//! ```text
//! delayed-return -H delayed-time:250 --requests 4 -- --extra-arg
//!     → config (file or defaults) → logging/metrics
//!     → lifecycle::start (select processor, init with options + trailing args)
//!     → Pipeline::process_many (one task per request)
//!     → JSON reports on stdout, logs on stderr
//! ```

use std::path::PathBuf;

use bytes::Bytes;
use clap::Parser;

use delayed_return::config::{load_config, validation::validate_config, ConfigError, DelayConfig};
use delayed_return::lifecycle;
use delayed_return::observability::{logging, metrics};
use delayed_return::pipeline::StageEvent;
use delayed_return::processor::AllHeaders;

#[derive(Parser)]
#[command(name = "delayed-return")]
#[command(about = "Run simulated requests through the delayed-return processor", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    /// Request header as `name:value`, repeatable.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Number of concurrent requests to simulate.
    #[arg(short = 'n', long, default_value_t = 1)]
    requests: usize,

    /// Request body sent through the body stages.
    #[arg(long, default_value = "")]
    body: String,

    /// Arguments passed through to the processor's init hook.
    #[arg(last = true)]
    args: Vec<String>,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected name:value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DelayConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "delayed-return starting");

    if config.observability.metrics_enabled {
        metrics::init_metrics(&config.observability.metrics_address)?;
    }

    let pipeline = lifecycle::start(&config, cli.args)?;

    let headers: AllHeaders = cli.headers.into_iter().collect();
    let body = Bytes::from(cli.body);
    let requests = (0..cli.requests)
        .map(|_| StageEvent::exchange(headers.clone(), body.clone()))
        .collect();

    let reports = pipeline.process_many(requests).await?;
    pipeline.finish();

    println!("{}", serde_json::to_string_pretty(&reports)?);

    tracing::info!("Shutdown complete");
    Ok(())
}
