use std::io;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global log subscriber.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then `warn`. Logs go to
/// stderr so they never interleave with the game screen on stdout.
pub(crate) fn init(directives: Option<&str>) -> anyhow::Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid log filter: {directives}"))?,
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))
}
