//! CLI configuration file and flag overrides.
//!
//! ```json
//! {
//!   "url": "http://seedbox:8112/json",
//!   "password": "deluge",
//!   "downloadLocation": "/data/torrents",
//!   "timeoutSecs": 30,
//!   "cookies": { "https://private.example/": "uid=1; pass=abc" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use deluge::ClientConfig;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CliError, Result};

pub const DEFAULT_URL: &str = "http://localhost:8112/json";
/// Password a fresh WebUI install ships with.
pub const DEFAULT_PASSWORD: &str = "deluge";

/// On-disk config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub password: Option<String>,
	#[serde(default)]
	pub download_location: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	/// Prefix → cookie map; validated when applied to the client.
	#[serde(default)]
	pub cookies: Option<Value>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub url: Option<String>,
	pub password: Option<String>,
	pub download_location: Option<String>,
}

/// Final settings for building a client.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub client: ClientConfig,
	pub cookies: Option<Value>,
}

pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("deluge-rpc").join("config.json"))
}

impl FileConfig {
	pub fn load(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).map_err(|e| CliError::Config(format!("cannot read {}: {}", path.display(), e)))?;
		serde_json::from_str(&content).map_err(|e| CliError::Config(format!("cannot parse {}: {}", path.display(), e)))
	}

	/// Loads `explicit` if given, else the default path if it exists.
	///
	/// A missing explicit file is an error; a missing default file is not.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_config_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	pub fn resolve(self, overrides: Overrides) -> ResolvedConfig {
		let url = overrides.url.or(self.url).unwrap_or_else(|| DEFAULT_URL.to_string());
		let password = overrides.password.or(self.password).unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

		let mut client = ClientConfig::new(url, password);
		if let Some(location) = overrides.download_location.or(self.download_location) {
			client = client.with_download_location(location);
		}
		if let Some(secs) = self.timeout_secs {
			client = client.with_timeout(Duration::from_secs(secs));
		}

		ResolvedConfig {
			client,
			cookies: self.cookies,
		}
	}
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	fn write(dir: &TempDir, content: &str) -> PathBuf {
		let path = dir.path().join("config.json");
		fs::write(&path, content).unwrap();
		path
	}

	#[test]
	fn loads_camel_case_file() {
		let temp = TempDir::new().unwrap();
		let path = write(
			&temp,
			r#"{
  "url": "http://seedbox:8112/json",
  "password": "s3cret",
  "downloadLocation": "/data",
  "timeoutSecs": 12,
  "cookies": { "https://private.example/": "uid=1" }
}"#,
		);

		let config = FileConfig::load(&path).unwrap();
		assert_eq!(config.url.as_deref(), Some("http://seedbox:8112/json"));
		assert_eq!(config.download_location.as_deref(), Some("/data"));
		assert_eq!(config.timeout_secs, Some(12));
		assert_eq!(config.cookies.unwrap()["https://private.example/"], "uid=1");
	}

	#[test]
	fn missing_explicit_file_is_error() {
		let err = FileConfig::discover(Some(Path::new("/definitely/missing/config.json"))).unwrap_err();
		assert!(err.to_string().contains("cannot read"));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let temp = TempDir::new().unwrap();
		let path = write(&temp, r#"{ "uri": "http://typo" }"#);
		assert!(FileConfig::load(&path).unwrap_err().to_string().contains("cannot parse"));
	}

	#[test]
	fn overrides_win_over_file() {
		let file = FileConfig {
			url: Some("http://file:8112/json".into()),
			password: Some("file-pw".into()),
			download_location: Some("/file".into()),
			timeout_secs: Some(3),
			cookies: None,
		};
		let resolved = file.resolve(Overrides {
			url: Some("http://flag:8112/json".into()),
			password: None,
			download_location: Some("/flag".into()),
		});

		assert_eq!(resolved.client.url, "http://flag:8112/json");
		assert_eq!(resolved.client.password, "file-pw");
		assert_eq!(resolved.client.download_location.as_deref(), Some("/flag"));
		assert_eq!(resolved.client.timeout, Some(Duration::from_secs(3)));
	}

	#[test]
	fn empty_config_uses_webui_defaults() {
		let resolved = FileConfig::default().resolve(Overrides::default());
		assert_eq!(resolved.client.url, DEFAULT_URL);
		assert_eq!(resolved.client.password, DEFAULT_PASSWORD);
		assert!(resolved.client.download_location.is_none());
		assert!(resolved.client.timeout.is_none());
	}
}
