//! Diagnostic logging setup for the provisioner binary.

// crates.io
use tracing_subscriber::EnvFilter;

/// Installs a stderr-bound subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// stdout is reserved for the launch descriptor, so every diagnostic stream must end up on
/// stderr.
pub fn init_stderr_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
