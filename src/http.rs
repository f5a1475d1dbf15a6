//! HTTP fetch seam for hive-instance OAuth 2.0 configs.
//!
//! [`OAuth2ConfigFetcher`] is the provisioner's only dependency on an HTTP stack; tests
//! substitute mock implementations instead of touching the network. The default
//! [`ReqwestFetcher`] applies [`FETCH_TIMEOUT`] so a stalled hive instance can never block
//! setup indefinitely.

// std
use std::time::Duration;
// self
use crate::{
	_prelude::*,
	config::HiveConfig,
	credentials::OAuth2Config,
	error::{BoxError, ConfigError},
};

/// Request header carrying the hive API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Upper bound applied to one config fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Future returned by [`OAuth2ConfigFetcher`] implementations.
pub type FetchFuture<'a> =
	Pin<Box<dyn Future<Output = Result<OAuth2Config, FetchError>> + 'a + Send>>;

/// Capability for retrieving a hive instance's OAuth 2.0 config.
pub trait OAuth2ConfigFetcher
where
	Self: Send + Sync,
{
	/// Performs one fetch attempt for the configured instance. No retries.
	fn fetch<'a>(&'a self, hive: &'a HiveConfig) -> FetchFuture<'a>;
}

/// Error type produced by [`OAuth2ConfigFetcher`] implementations.
///
/// Every variant is recoverable: the provisioner logs it and falls back to manual credential
/// setup instead of aborting.
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// Base URL cannot address the oauth2-config endpoint.
	#[error("Hive base URL cannot address the oauth2-config endpoint.")]
	InvalidEndpoint,
	/// Underlying transport reported a network failure.
	#[error("Network error occurred while calling the hive instance.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Hive instance responded with a non-success status.
	#[error("Hive instance returned HTTP {status}.")]
	Status {
		/// HTTP status code of the response.
		status: u16,
	},
	/// Response body was not a well-formed [`OAuth2Config`].
	#[error("Hive instance returned a malformed oauth2-config body.")]
	MalformedResponse {
		/// Structured parsing failure naming the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl FetchError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for FetchError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Builds `{base}/api/hive-instances/{id}/oauth2-config` for the configured instance.
pub fn oauth2_config_endpoint(hive: &HiveConfig) -> Result<Url, FetchError> {
	let mut url = hive.base_url.clone();

	url.path_segments_mut()
		.map_err(|()| FetchError::InvalidEndpoint)?
		.pop_if_empty()
		.extend(["api", "hive-instances", hive.instance_id.as_str(), "oauth2-config"]);

	Ok(url)
}

/// Default fetcher backed by [`ReqwestClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestFetcher(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestFetcher {
	/// Builds a fetcher with [`FETCH_TIMEOUT`] applied.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(FETCH_TIMEOUT).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`]; the caller owns timeout policy.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl OAuth2ConfigFetcher for ReqwestFetcher {
	fn fetch<'a>(&'a self, hive: &'a HiveConfig) -> FetchFuture<'a> {
		Box::pin(async move {
			let url = oauth2_config_endpoint(hive)?;
			let response =
				self.0.get(url).header(API_KEY_HEADER, hive.api_key.expose()).send().await?;
			let status = response.status();

			if !status.is_success() {
				return Err(FetchError::Status { status: status.as_u16() });
			}

			let bytes = response.bytes().await?;
			let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

			serde_path_to_error::deserialize(&mut deserializer)
				.map_err(|e| FetchError::MalformedResponse { source: e })
		})
	}
}
