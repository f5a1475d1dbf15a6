//! Launch descriptor contract consumed by the MCP host.

// self
use crate::{
	_prelude::*,
	store::{CLIENT_SECRETS_FILE, TOKEN_FILE},
	sync::UV,
};

/// Environment key pointing the server at the client-secrets file.
pub const ENV_GOOGLE_CLIENT_CONFIG: &str = "GOOGLE_CLIENT_CONFIG";
/// Environment key pointing the server at the token file.
pub const ENV_GOOGLE_TOKEN_FILE: &str = "GOOGLE_TOKEN_FILE";

/// JSON object printed to stdout describing how to start the MCP server.
///
/// Emitted exactly once per run regardless of the OAuth 2.0 branch outcome; its `env` entries
/// always point at the two credential paths whether or not this run (re)wrote them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
	/// Program the host should execute.
	pub command: String,
	/// Ordered argument vector.
	pub args: Vec<String>,
	/// Environment entries pointing at the credential files.
	pub env: BTreeMap<String, String>,
	/// Absolute working directory for the launch.
	pub cwd: PathBuf,
}
impl LaunchDescriptor {
	/// Builds the fixed-shape descriptor for a workspace.
	pub fn for_workspace(workspace: impl Into<PathBuf>) -> Self {
		let env = [
			(ENV_GOOGLE_CLIENT_CONFIG.to_owned(), format!("./{CLIENT_SECRETS_FILE}")),
			(ENV_GOOGLE_TOKEN_FILE.to_owned(), format!("./{TOKEN_FILE}")),
		]
		.into_iter()
		.collect();

		Self {
			command: UV.into(),
			args: ["run", "mcp", "dev", "src/main.py"].map(str::to_owned).into(),
			env,
			cwd: workspace.into(),
		}
	}

	/// Renders the descriptor as the single JSON object the host consumes.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).map_err(Error::Descriptor)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn descriptor_carries_the_fixed_launch_shape() {
		let descriptor = LaunchDescriptor::for_workspace("/srv/mcp");

		assert_eq!(descriptor.command, "uv");
		assert_eq!(descriptor.args, ["run", "mcp", "dev", "src/main.py"]);
		assert_eq!(
			descriptor.env.get(ENV_GOOGLE_CLIENT_CONFIG).map(String::as_str),
			Some("./credentials/client_secrets.json"),
		);
		assert_eq!(
			descriptor.env.get(ENV_GOOGLE_TOKEN_FILE).map(String::as_str),
			Some("./token.json"),
		);
		assert_eq!(descriptor.env.len(), 2);
		assert_eq!(descriptor.cwd, PathBuf::from("/srv/mcp"));
	}

	#[test]
	fn descriptor_serializes_to_a_single_json_object() {
		let descriptor = LaunchDescriptor::for_workspace("/srv/mcp");
		let json = descriptor.to_json().expect("Descriptor should serialize.");
		let value: serde_json::Value =
			serde_json::from_str(&json).expect("Serialized descriptor should parse back.");
		let object = value.as_object().expect("Descriptor should be a JSON object.");

		assert_eq!(object.len(), 4);
		assert_eq!(object.get("cwd"), Some(&serde_json::Value::String("/srv/mcp".into())));

		let parsed: LaunchDescriptor =
			serde_json::from_str(&json).expect("Descriptor should round-trip.");

		assert_eq!(parsed, descriptor);
	}
}
