//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SPRINTBOARD_LOG";

/// Installs a formatted subscriber writing to standard error.
///
/// The filter comes from `SPRINTBOARD_LOG` when set, otherwise from
/// `default_level`.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init_tracing(default_level: &str) -> eyre::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| eyre::eyre!("failed to initialize tracing subscriber: {err}"))
}
