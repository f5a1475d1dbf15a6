// std
use std::{
	env, fs,
	path::{Path, PathBuf},
	process,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::SystemTime,
};
// self
use hive_provision::{
	config::{ApiKey, HiveConfig, ProvisioningContext},
	credentials::OAuth2Config,
	error::Error,
	http::{FetchError, FetchFuture, OAuth2ConfigFetcher},
	launch::LaunchDescriptor,
	provision::{ProvisionOutcome, Provisioner},
	store::{CredentialStore, StoreError},
	sync::{DependencySync, SyncError, SyncFuture},
	url::Url,
};

const RESPONSE: &str = r#"{
	"oauthKeys": {
		"client_id": "cid-e2e",
		"client_secret": "cs-e2e",
		"redirect_uris": ["http://localhost:8765/"],
		"auth_uri": "https://accounts.google.com/o/oauth2/auth"
	},
	"credentials": {
		"refresh_token": "rt-e2e",
		"access_token": "at-e2e"
	}
}"#;

fn temp_workspace() -> PathBuf {
	let nanos = SystemTime::now()
		.duration_since(SystemTime::UNIX_EPOCH)
		.expect("Clock should be past the epoch.")
		.as_nanos();
	let dir = env::temp_dir().join(format!("hive_provision_it_{}_{nanos}", process::id()));

	fs::create_dir_all(dir.join("credentials"))
		.expect("Temp workspace fixture should be creatable.");

	dir
}

enum CannedResponse {
	Config(&'static str),
	Unavailable,
}

struct CannedFetcher {
	calls: AtomicUsize,
	response: CannedResponse,
}
impl CannedFetcher {
	fn with_config(body: &'static str) -> Self {
		Self { calls: AtomicUsize::new(0), response: CannedResponse::Config(body) }
	}

	fn unavailable() -> Self {
		Self { calls: AtomicUsize::new(0), response: CannedResponse::Unavailable }
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl OAuth2ConfigFetcher for CannedFetcher {
	fn fetch<'a>(&'a self, _: &'a HiveConfig) -> FetchFuture<'a> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			match self.response {
				CannedResponse::Config(body) => Ok(serde_json::from_str::<OAuth2Config>(body)
					.expect("Canned response fixture should parse.")),
				CannedResponse::Unavailable => Err(FetchError::Status { status: 503 }),
			}
		})
	}
}

struct NoopSync;
impl DependencySync for NoopSync {
	fn sync(&self) -> SyncFuture<'_> {
		Box::pin(async { Ok(()) })
	}
}

struct FailingSync;
impl DependencySync for FailingSync {
	fn sync(&self) -> SyncFuture<'_> {
		Box::pin(async {
			Err(SyncError::Spawn {
				program: "uv".into(),
				source: std::io::Error::other("sync backend offline"),
			})
		})
	}
}

fn hive_context(workspace: PathBuf) -> ProvisioningContext {
	ProvisioningContext {
		hive: Some(HiveConfig {
			api_key: ApiKey::new("e2e-key"),
			base_url: Url::parse("https://hive.example.com").expect("Base URL should parse."),
			instance_id: "hive-e2e".into(),
		}),
		workspace,
	}
}

fn bare_context(workspace: PathBuf) -> ProvisioningContext {
	ProvisioningContext { hive: None, workspace }
}

fn provisioner(
	fetcher: Arc<CannedFetcher>,
	sync: Arc<dyn DependencySync>,
	workspace: &Path,
) -> Provisioner {
	Provisioner::new(sync, fetcher, CredentialStore::new(workspace))
}

#[tokio::test]
async fn unconfigured_run_skips_fetch_and_still_emits_a_descriptor() {
	let workspace = temp_workspace();
	let fetcher = Arc::new(CannedFetcher::with_config(RESPONSE));
	let report = provisioner(fetcher.clone(), Arc::new(NoopSync), &workspace)
		.provision(&bare_context(workspace.clone()))
		.await
		.expect("Unconfigured run should succeed.");

	assert_eq!(report.outcome, ProvisionOutcome::SkippedNoConfig);
	assert_eq!(fetcher.calls(), 0);
	assert_eq!(report.descriptor.cwd, workspace);
	assert!(!workspace.join("token.json").exists());
	assert!(!workspace.join("credentials/client_secrets.json").exists());

	let parsed: LaunchDescriptor = serde_json::from_str(
		&report.descriptor.to_json().expect("Descriptor should serialize."),
	)
	.expect("Emitted descriptor should be valid JSON.");

	assert_eq!(parsed, report.descriptor);

	fs::remove_dir_all(&workspace).expect("Temp workspace should be removable.");
}

#[tokio::test]
async fn successful_fetch_writes_the_google_compatible_layout() {
	let workspace = temp_workspace();
	let fetcher = Arc::new(CannedFetcher::with_config(RESPONSE));
	let report = provisioner(fetcher.clone(), Arc::new(NoopSync), &workspace)
		.provision(&hive_context(workspace.clone()))
		.await
		.expect("Configured run should succeed.");

	assert_eq!(report.outcome, ProvisionOutcome::Provisioned);
	assert_eq!(fetcher.calls(), 1);

	let token: serde_json::Value = serde_json::from_slice(
		&fs::read(workspace.join("token.json")).expect("Token file should exist."),
	)
	.expect("Token file should be valid JSON.");
	let token_object = token.as_object().expect("Token file should be a JSON object.");

	assert_eq!(token_object.len(), 5);
	assert_eq!(token_object.get("client_id"), Some(&"cid-e2e".into()));
	assert_eq!(token_object.get("client_secret"), Some(&"cs-e2e".into()));
	assert_eq!(token_object.get("refresh_token"), Some(&"rt-e2e".into()));
	assert_eq!(token_object.get("token"), Some(&"at-e2e".into()));
	assert_eq!(token_object.get("type"), Some(&"authorized_user".into()));

	let secrets: serde_json::Value = serde_json::from_slice(
		&fs::read(workspace.join("credentials/client_secrets.json"))
			.expect("Client secrets file should exist."),
	)
	.expect("Client secrets file should be valid JSON.");
	let secrets_object = secrets.as_object().expect("Secrets file should be a JSON object.");
	let expected_keys: serde_json::Value =
		serde_json::from_str::<serde_json::Value>(RESPONSE).expect("Fixture should parse.")
			["oauthKeys"]
			.clone();

	assert_eq!(secrets_object.len(), 1);
	assert_eq!(secrets_object.get("web"), Some(&expected_keys));

	fs::remove_dir_all(&workspace).expect("Temp workspace should be removable.");
}

#[tokio::test]
async fn failed_fetch_leaves_existing_files_untouched() {
	let workspace = temp_workspace();
	let sentinel = r#"{"sentinel":true}"#;

	fs::write(workspace.join("token.json"), sentinel)
		.expect("Sentinel token file should be writable.");

	let fetcher = Arc::new(CannedFetcher::unavailable());
	let report = provisioner(fetcher.clone(), Arc::new(NoopSync), &workspace)
		.provision(&hive_context(workspace.clone()))
		.await
		.expect("Fetch failure should not abort the run.");

	assert!(matches!(&report.outcome, ProvisionOutcome::FetchFailed { reason } if reason.contains("503")));
	assert_eq!(fetcher.calls(), 1);
	assert_eq!(
		fs::read_to_string(workspace.join("token.json")).expect("Sentinel should survive."),
		sentinel,
	);
	assert!(!workspace.join("credentials/client_secrets.json").exists());
	assert_eq!(report.descriptor.cwd, workspace);

	fs::remove_dir_all(&workspace).expect("Temp workspace should be removable.");
}

#[tokio::test]
async fn missing_credentials_directory_fails_the_run() {
	let workspace = temp_workspace();

	fs::remove_dir_all(workspace.join("credentials"))
		.expect("Fixture directory should be removable.");

	let fetcher = Arc::new(CannedFetcher::with_config(RESPONSE));
	let err = provisioner(fetcher, Arc::new(NoopSync), &workspace)
		.provision(&hive_context(workspace.clone()))
		.await
		.expect_err("Missing credentials directory should abort the run.");

	assert!(matches!(err, Error::Store(StoreError::MissingCredentialsDir { .. })));

	fs::remove_dir_all(&workspace).expect("Temp workspace should be removable.");
}

#[tokio::test]
async fn sync_failure_is_swallowed() {
	let workspace = temp_workspace();
	let fetcher = Arc::new(CannedFetcher::with_config(RESPONSE));
	let report = provisioner(fetcher, Arc::new(FailingSync), &workspace)
		.provision(&bare_context(workspace.clone()))
		.await
		.expect("Sync failure should not abort the run.");

	assert_eq!(report.outcome, ProvisionOutcome::SkippedNoConfig);

	fs::remove_dir_all(&workspace).expect("Temp workspace should be removable.");
}
