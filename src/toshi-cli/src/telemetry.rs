//! Logging setup for the command line.
//!
//! Events go to stderr so command output on stdout stays clean. `RUST_LOG`
//! overrides the default filter; `--json-logs` switches to JSON lines.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "toshi=info,toshi_rs=info,toshi_core=info";

pub fn init_telemetry(json: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()?;
    }

    tracing::debug!(json, "telemetry initialized");
    Ok(())
}
