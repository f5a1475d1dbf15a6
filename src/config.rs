//! Environment-derived configuration for a provisioning run.
//!
//! The process environment is read exactly once into a [`ProvisioningContext`]; everything
//! downstream works off that snapshot, so tests can inject a fake environment through
//! [`ProvisioningContext::from_lookup`].

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable holding the hive API key.
pub const ENV_API_KEY: &str = "API_KEY";
/// Environment variable holding the hive API base URL.
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
/// Environment variable holding the hive instance identifier.
pub const ENV_HIVE_INSTANCE_ID: &str = "HIVE_INSTANCE_ID";

/// Redacted API key wrapper keeping the secret out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);
impl ApiKey {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ApiKey {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiKey").field(&"<redacted>").finish()
	}
}
impl Display for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Remote hive-instance coordinates; present only when the full triple is configured.
#[derive(Clone, Debug)]
pub struct HiveConfig {
	/// API key sent as the `x-api-key` request header.
	pub api_key: ApiKey,
	/// Base URL of the hive API.
	pub base_url: Url,
	/// Hive instance whose OAuth 2.0 config should be fetched.
	pub instance_id: String,
}

/// Read-only configuration snapshot taken once at startup.
#[derive(Clone, Debug)]
pub struct ProvisioningContext {
	/// Hive coordinates, when the environment provides the full triple.
	pub hive: Option<HiveConfig>,
	/// Absolute directory the provisioner was invoked from.
	pub workspace: PathBuf,
}
impl ProvisioningContext {
	/// Builds the context from the process environment and current working directory.
	pub fn from_env() -> Result<Self, ConfigError> {
		let workspace = env::current_dir()?;

		Self::from_lookup(|key| env::var(key).ok(), workspace)
	}

	/// Builds the context from an arbitrary variable lookup.
	///
	/// OAuth 2.0 provisioning activates only when all three variables are present and
	/// non-empty; any partial configuration degrades to the fully-unset behavior. A base URL
	/// that is set but unparseable is an operator mistake and surfaces as an error rather
	/// than a silent skip.
	pub fn from_lookup<F>(lookup: F, workspace: PathBuf) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
		let hive = match (
			non_empty(ENV_API_KEY),
			non_empty(ENV_API_BASE_URL),
			non_empty(ENV_HIVE_INSTANCE_ID),
		) {
			(Some(api_key), Some(base_url), Some(instance_id)) => {
				let parsed = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
					value: base_url.clone(),
					source: e,
				})?;

				Some(HiveConfig {
					api_key: ApiKey::new(api_key),
					base_url: parsed,
					instance_id,
				})
			},
			_ => None,
		};

		Ok(Self { hive, workspace })
	}
}
