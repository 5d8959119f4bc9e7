//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. The pass journal (stdout and
//! the log file) is separate and not affected by the level set here.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured `level`:
///
/// ```bash
/// RUST_LOG=debug replicr -s src -d dst -i 30 -l sync.log
/// RUST_LOG=replicr::reconcile=trace replicr ...
/// ```
pub fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level))
		.unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

// vim: ts=4
