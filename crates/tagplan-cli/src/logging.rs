//! Console diagnostics.
//!
//! Audit entries are mirrored under the `tagplan::audit` target; they are kept
//! off the console unless `-v` is given since they also go to the log file.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "tagplan=info,tagplan::audit=warn";
const VERBOSE_LOG_FILTER: &str = "tagplan=debug";

/// Pick the console filter. `RUST_LOG` wins over the default but not over `-v`.
pub fn console_filter(verbose: u8) -> EnvFilter {
    if verbose > 0 {
        return EnvFilter::new(VERBOSE_LOG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize tracing with stderr output.
pub fn init_logging(verbose: u8) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose > 1)
                .with_filter(console_filter(verbose)),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
