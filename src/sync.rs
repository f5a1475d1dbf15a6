//! Best-effort dependency sync for the MCP server workspace.

// std
use std::process::Stdio;
// crates.io
use tokio::process::Command;
// self
use crate::_prelude::*;

/// Program invoked to sync the MCP server's dependencies and, later, to run it.
pub const UV: &str = "uv";

/// Future returned by [`DependencySync`] implementations.
pub type SyncFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SyncError>> + 'a + Send>>;

/// Capability for syncing the workspace's dependencies ahead of launch.
pub trait DependencySync
where
	Self: Send + Sync,
{
	/// Runs one sync attempt; the provisioner treats failures as non-fatal.
	fn sync(&self) -> SyncFuture<'_>;
}

/// Error produced by [`DependencySync`] implementations; always recoverable.
#[derive(Debug, ThisError)]
pub enum SyncError {
	/// Sync program could not be started.
	#[error("Failed to start `{program}`.")]
	Spawn {
		/// Program that failed to start.
		program: String,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// Sync program exited unsuccessfully.
	#[error("`{program} sync` exited with {status}.")]
	Failed {
		/// Program that reported the failure.
		program: String,
		/// Exit status of the subprocess.
		status: std::process::ExitStatus,
	},
}

/// Runs `uv sync` in the workspace with all of its output discarded.
#[derive(Clone, Debug)]
pub struct UvSync {
	program: String,
	workspace: PathBuf,
}
impl UvSync {
	/// Builds a sync runner for the provided workspace.
	pub fn new(workspace: impl Into<PathBuf>) -> Self {
		Self { program: UV.into(), workspace: workspace.into() }
	}

	/// Overrides the sync program, e.g. when `uv` lives outside `PATH`.
	pub fn with_program(mut self, program: impl Into<String>) -> Self {
		self.program = program.into();

		self
	}
}
impl DependencySync for UvSync {
	fn sync(&self) -> SyncFuture<'_> {
		Box::pin(async move {
			// stdout is reserved for the launch descriptor and sync chatter is noise, so
			// the subprocess gets no streams at all.
			let status = Command::new(&self.program)
				.arg("sync")
				.current_dir(&self.workspace)
				.stdin(Stdio::null())
				.stdout(Stdio::null())
				.stderr(Stdio::null())
				.status()
				.await
				.map_err(|e| SyncError::Spawn { program: self.program.clone(), source: e })?;

			if status.success() {
				Ok(())
			} else {
				Err(SyncError::Failed { program: self.program.clone(), status })
			}
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::env;
	// self
	use super::*;

	#[tokio::test]
	async fn successful_program_reports_ok() {
		let runner = UvSync::new(env::temp_dir()).with_program("true");

		runner.sync().await.expect("`true` should sync successfully.");
	}

	#[tokio::test]
	async fn failing_program_reports_exit_status() {
		let runner = UvSync::new(env::temp_dir()).with_program("false");
		let err = runner.sync().await.expect_err("`false` should fail the sync.");

		assert!(matches!(err, SyncError::Failed { .. }));
	}

	#[tokio::test]
	async fn missing_program_reports_spawn_failure() {
		let runner = UvSync::new(env::temp_dir()).with_program("hive-provision-no-such-tool");
		let err = runner.sync().await.expect_err("Missing program should fail to spawn.");

		assert!(matches!(err, SyncError::Spawn { .. }));
	}
}
