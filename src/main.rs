//! `hive-provision` binary—bootstrap a local MCP server's credentials and print its launch
//! descriptor.

// std
use std::{process::ExitCode, sync::Arc};
// self
use hive_provision::{
	config::ProvisioningContext,
	error::Result,
	http::ReqwestFetcher,
	obs,
	provision::{ProvisionOutcome, Provisioner},
	store::CredentialStore,
	sync::UvSync,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	obs::init_stderr_tracing();

	match run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!(error = %e, "Provisioning failed.");

			ExitCode::FAILURE
		},
	}
}

async fn run() -> Result<()> {
	let context = ProvisioningContext::from_env()?;
	let provisioner = Provisioner::new(
		Arc::new(UvSync::new(context.workspace.clone())),
		Arc::new(ReqwestFetcher::new()?),
		CredentialStore::new(context.workspace.clone()),
	);
	let report = provisioner.provision(&context).await?;

	if let ProvisionOutcome::FetchFailed { reason } = &report.outcome {
		tracing::warn!(
			%reason,
			"Continuing without fresh credentials; run the manual OAuth setup before first use.",
		);
	}

	// The descriptor is the only thing allowed on stdout.
	println!("{}", report.descriptor.to_json()?);

	Ok(())
}
