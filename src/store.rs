//! Credential persistence in the Google OAuth file layout.

// std
use std::{
	fs::{self, File},
	io::Write,
};
// self
use crate::{
	_prelude::*,
	credentials::{ClientSecretsFile, TokenFile},
};

/// Relative path of the authorized-user token file.
pub const TOKEN_FILE: &str = "token.json";
/// Relative directory that must pre-exist for the client-secrets file.
pub const CREDENTIALS_DIR: &str = "credentials";
/// Relative path of the client-secrets file.
pub const CLIENT_SECRETS_FILE: &str = "credentials/client_secrets.json";

/// Error type produced by [`CredentialStore`] operations.
///
/// Unlike fetch and sync failures these are fatal: a run that cannot lay down the files its
/// launch descriptor points at must fail loudly.
#[derive(Debug, ThisError)]
pub enum StoreError {
	/// The install step creates `credentials/`; provisioning never does.
	#[error("Credentials directory {} does not exist.", path.display())]
	MissingCredentialsDir {
		/// Expected directory location.
		path: PathBuf,
	},
	/// Serialization failure while rendering a credential file.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Filesystem-level failure.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Writes the token and client-secrets files under a workspace directory.
#[derive(Clone, Debug)]
pub struct CredentialStore {
	workspace: PathBuf,
}
impl CredentialStore {
	/// Builds a store rooted at the provided workspace.
	pub fn new(workspace: impl Into<PathBuf>) -> Self {
		Self { workspace: workspace.into() }
	}

	/// Path of `token.json` under the workspace.
	pub fn token_path(&self) -> PathBuf {
		self.workspace.join(TOKEN_FILE)
	}

	/// Path of `credentials/client_secrets.json` under the workspace.
	pub fn client_secrets_path(&self) -> PathBuf {
		self.workspace.join(CLIENT_SECRETS_FILE)
	}

	/// Persists both credential files, replacing any previous run's output.
	///
	/// Contents are echoed to the diagnostic stream so operators can confirm what was
	/// written.
	pub fn persist(
		&self,
		token: &TokenFile,
		secrets: &ClientSecretsFile,
	) -> Result<(), StoreError> {
		let dir = self.workspace.join(CREDENTIALS_DIR);

		if !dir.is_dir() {
			return Err(StoreError::MissingCredentialsDir { path: dir });
		}

		let token_json = render(token)?;
		let secrets_json = render(secrets)?;

		write_replace(&self.token_path(), token_json.as_bytes())?;
		write_replace(&self.client_secrets_path(), secrets_json.as_bytes())?;

		tracing::info!(path = %self.token_path().display(), contents = %token_json, "Wrote token file.");
		tracing::info!(
			path = %self.client_secrets_path().display(),
			contents = %secrets_json,
			"Wrote client secrets file.",
		);

		Ok(())
	}
}

fn render<T>(value: &T) -> Result<String, StoreError>
where
	T: Serialize,
{
	serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialization {
		message: format!("Failed to render credential file: {e}"),
	})
}

fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
	let mut tmp_path = path.to_path_buf();

	tmp_path.set_extension("tmp");

	{
		let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
			message: format!("Failed to create {}: {e}", tmp_path.display()),
		})?;

		file.write_all(bytes).map_err(|e| StoreError::Backend {
			message: format!("Failed to write {}: {e}", tmp_path.display()),
		})?;
		file.sync_all().map_err(|e| StoreError::Backend {
			message: format!("Failed to sync {}: {e}", tmp_path.display()),
		})?;
	}

	fs::rename(&tmp_path, path).map_err(|e| StoreError::Backend {
		message: format!("Failed to replace {}: {e}", path.display()),
	})
}
