//! One-shot credential provisioner for local MCP servers—sync the workspace's dependencies,
//! pull an OAuth 2.0 config from a hive instance, lay down Google-compatible credential files,
//! and print the launch descriptor the MCP host consumes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod launch;
pub mod obs;
pub mod provision;
pub mod store;
pub mod sync;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::{Path, PathBuf},
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
