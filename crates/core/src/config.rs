//! Client construction parameters.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Endpoint, password and defaults for one [`DelugeClient`](crate::DelugeClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// Full URL of the WebUI JSON endpoint, e.g. `http://localhost:8112/json`.
	pub url: String,
	pub password: String,
	/// Used for [`Destination::Default`](crate::Destination::Default) submissions.
	pub download_location: Option<String>,
	/// Per-request timeout at the HTTP boundary. `None` never times out.
	pub timeout: Option<Duration>,
}

impl ClientConfig {
	pub fn new(url: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			password: password.into(),
			download_location: None,
			timeout: None,
		}
	}

	pub fn with_download_location(mut self, location: impl Into<String>) -> Self {
		self.download_location = Some(location.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Parses and checks the endpoint URL.
	pub fn endpoint(&self) -> Result<Url> {
		let url = Url::parse(&self.url).map_err(|e| Error::InvalidConfig(format!("invalid endpoint URL {:?}: {}", self.url, e)))?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(Error::InvalidConfig(format!("endpoint must be http or https, got {:?}", url.scheme())));
		}
		Ok(url)
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("url", &self.url)
			.field("password", &"<redacted>")
			.field("download_location", &self.download_location)
			.field("timeout", &self.timeout)
			.finish()
	}
}
