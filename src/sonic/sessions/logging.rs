//! Tracing setup for the command line.
//!
//! Logs go to stderr so they never mix with rendered output. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::sonic::sessions::error::{Result, ToolError};

const DEFAULT_FILTER: &str = "sonic_sessions=warn";
const VERBOSE_FILTER: &str = "sonic_sessions=debug";

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_cli(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}
