//! Provisioner-wide error types shared across configuration, fetching, and persistence.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical provisioner error exposed by public APIs.
///
/// Fetch and sync failures never appear here; the workflow swallows them by design and reports
/// them through [`ProvisionOutcome`](crate::provision::ProvisionOutcome) instead.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credential persistence failure.
	#[error("{0}")]
	Store(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Launch descriptor could not be serialized.
	#[error("Launch descriptor could not be serialized.")]
	Descriptor(#[source] serde_json::Error),
}

/// Configuration failures raised while assembling the provisioning run.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `API_BASE_URL` is set but cannot be parsed as a URL.
	#[error("API_BASE_URL is not a valid URL: {value}.")]
	InvalidBaseUrl {
		/// Offending environment value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Working directory could not be resolved.
	#[error("Working directory could not be resolved.")]
	Workdir(#[from] std::io::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
