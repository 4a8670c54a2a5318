//! Development-time tracing for debugging spool state handling.
//!
//! Events are diagnostics only, emitted at `debug` from the `io` and `store`
//! modules. Read failures stay silent at the default level; callers that want
//! to surface a reset state inspect [`crate::io::run_state::StateLoad`].

use anyhow::{Result, anyhow};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber a driver process uses for spool diagnostics.
///
/// Filtering comes from `RUST_LOG` (falling back to `warn`); events go to
/// stderr in compact form. Does nothing if a subscriber is already set.
///
/// # Example
/// ```bash
/// RUST_LOG=spool=debug my-driver
/// ```
pub fn init() {
    let _ = try_init();
}

/// Like [`init`], but reports whether a global subscriber was already set.
pub fn try_init() -> Result<()> {
    try_init_with_writer(std::io::stderr)
}

pub fn try_init_with_writer<W>(writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(writer).compact())
        .try_init()
        .map_err(|err| anyhow!("install tracing subscriber: {err}"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
