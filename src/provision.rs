//! Linear provisioning workflow: sync, fetch, persist, describe.
//!
//! Dependency sync is best-effort, the OAuth 2.0 branch runs only when the hive triple is
//! configured, and the launch descriptor is produced in every non-fatal path.

// self
use crate::{
	_prelude::*,
	config::ProvisioningContext,
	credentials::{ClientSecretsFile, TokenFile},
	http::OAuth2ConfigFetcher,
	launch::LaunchDescriptor,
	store::CredentialStore,
	sync::DependencySync,
};

/// How the optional OAuth 2.0 branch of a run concluded.
///
/// Fetch problems are data, not errors: the contract is to fall back to manual credential
/// setup and still hand the host a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProvisionOutcome {
	/// Credentials were fetched and both files written.
	Provisioned,
	/// Hive triple absent or incomplete; no fetch attempted.
	SkippedNoConfig,
	/// Fetch attempted and failed; existing files untouched.
	FetchFailed {
		/// Human-readable failure description.
		reason: String,
	},
}

/// Result of one provisioning run.
#[derive(Clone, Debug)]
pub struct ProvisionReport {
	/// OAuth 2.0 branch outcome.
	pub outcome: ProvisionOutcome,
	/// Descriptor to print on stdout.
	pub descriptor: LaunchDescriptor,
}

/// One-shot workflow driver over injectable sync and fetch collaborators.
pub struct Provisioner {
	sync: Arc<dyn DependencySync>,
	fetcher: Arc<dyn OAuth2ConfigFetcher>,
	store: CredentialStore,
}
impl Provisioner {
	/// Builds a provisioner from its collaborators.
	pub fn new(
		sync: Arc<dyn DependencySync>,
		fetcher: Arc<dyn OAuth2ConfigFetcher>,
		store: CredentialStore,
	) -> Self {
		Self { sync, fetcher, store }
	}

	/// Runs the full sequence for the provided context.
	///
	/// Sync and fetch failures are reported through [`ProvisionOutcome`]; only credential
	/// persistence failures abort the run.
	pub async fn provision(&self, context: &ProvisioningContext) -> Result<ProvisionReport> {
		if let Err(e) = self.sync.sync().await {
			tracing::warn!(error = %e, "Dependency sync failed; continuing.");
		}

		let outcome = match &context.hive {
			Some(hive) => {
				tracing::info!(
					instance = %hive.instance_id,
					"Fetching OAuth2 config from hive instance.",
				);

				match self.fetcher.fetch(hive).await {
					Ok(config) => {
						let token = TokenFile::from_config(&config);
						let secrets = ClientSecretsFile::from_config(&config);

						self.store.persist(&token, &secrets)?;

						tracing::info!("OAuth2 config saved.");

						ProvisionOutcome::Provisioned
					},
					Err(e) => {
						tracing::warn!(
							error = %e,
							"Failed to fetch OAuth2 config; falling back to manual setup.",
						);

						ProvisionOutcome::FetchFailed { reason: e.to_string() }
					},
				}
			},
			None => {
				tracing::debug!("Hive environment not configured; skipping OAuth2 fetch.");

				ProvisionOutcome::SkippedNoConfig
			},
		};
		let descriptor = LaunchDescriptor::for_workspace(context.workspace.clone());

		Ok(ProvisionReport { outcome, descriptor })
	}
}
