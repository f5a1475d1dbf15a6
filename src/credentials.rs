//! Wire and file shapes for the OAuth 2.0 credential hand-off.
//!
//! The hive instance replies with an [`OAuth2Config`]; one run projects it into the two files
//! the downstream MCP server reads: a Google authorized-user [`TokenFile`] and a
//! [`ClientSecretsFile`] wrapping the provider keys under the `web` application type.

// self
use crate::_prelude::*;

/// Literal `type` recorded in [`TokenFile`], matching Google's authorized-user layout.
pub const AUTHORIZED_USER: &str = "authorized_user";

/// OAuth client keys returned by the hive API.
///
/// Providers attach fields beyond the two the token file needs (redirect URIs, project
/// identifiers, endpoint URLs), so everything unrecognized is retained and written back
/// verbatim through [`ClientSecretsFile`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OAuthKeys {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Remaining provider-supplied fields, passed through untouched.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Token material already issued for the instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredentials {
	/// Long-lived refresh token.
	pub refresh_token: String,
	/// Current access token.
	pub access_token: String,
}

/// Response body of `GET /api/hive-instances/{id}/oauth2-config`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Config {
	/// OAuth client keys for the instance.
	#[serde(rename = "oauthKeys")]
	pub oauth_keys: OAuthKeys,
	/// Issued token material.
	pub credentials: IssuedCredentials,
}

/// Google-compatible authorized-user token file (`token.json`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFile {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Long-lived refresh token.
	pub refresh_token: String,
	/// Current access token.
	pub token: String,
	/// Always [`AUTHORIZED_USER`].
	#[serde(rename = "type")]
	pub kind: String,
}
impl TokenFile {
	/// Projects a fetched [`OAuth2Config`] into the token-file layout.
	pub fn from_config(config: &OAuth2Config) -> Self {
		Self {
			client_id: config.oauth_keys.client_id.clone(),
			client_secret: config.oauth_keys.client_secret.clone(),
			refresh_token: config.credentials.refresh_token.clone(),
			token: config.credentials.access_token.clone(),
			kind: AUTHORIZED_USER.into(),
		}
	}
}

/// Client-secrets file consumed by Google OAuth tooling (`credentials/client_secrets.json`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientSecretsFile {
	/// Entire `oauthKeys` object, unmodified, under the `web` application type.
	pub web: OAuthKeys,
}
impl ClientSecretsFile {
	/// Wraps the fetched keys without field selection.
	pub fn from_config(config: &OAuth2Config) -> Self {
		Self { web: config.oauth_keys.clone() }
	}
}
