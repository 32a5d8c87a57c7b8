//! Diagnostic logging for the `quickpick` binary.
//!
//! Logs go to stderr so that stdout stays reserved for picker output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding an `EnvFilter` directive.
pub(crate) const LOG_ENV: &str = "QUICKPICK_LOG";

fn default_directive(verbose: bool) -> &'static str {
	if verbose { "quickpick=debug,warn" } else { "warn" }
}

/// Install the global subscriber. `QUICKPICK_LOG` wins over `--verbose`.
pub(crate) fn initialize(verbose: bool) -> Result<()> {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(true);

	tracing_subscriber::registry()
		.with(filter)
		.with(stderr_layer)
		.try_init()?;
	Ok(())
}
