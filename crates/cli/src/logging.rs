//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so stdout stays a clean result envelope. `RUST_LOG`
//! overrides the verbosity-derived filter.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
///
/// Errors are always shown: factory failures are logged before they are
/// reported in the envelope.
pub fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "error",
		1 => "warn,idlers=info",
		_ => "debug",
	}
}

pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(verbosity > 1)
		.compact()
		.init();
}
