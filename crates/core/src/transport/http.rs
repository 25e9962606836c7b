use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use serde_json::Value;
use tracing::trace;
use url::Url;

use super::{Transport, TransportResponse};
use crate::error::{Error, Result};

/// HTTP transport posting JSON to the WebUI `/json` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	endpoint: Url,
}

impl HttpTransport {
	/// Creates a transport for `endpoint`.
	///
	/// `timeout` bounds each whole request; `None` waits indefinitely.
	pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		let client = builder
			.build()
			.map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;
		Ok(Self { client, endpoint })
	}

	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn post(&self, body: Value, cookie: &str) -> Result<TransportResponse> {
		let mut request = self.client.post(self.endpoint.clone()).json(&body);
		if !cookie.is_empty() {
			request = request.header(COOKIE, cookie);
		}

		let response = request
			.send()
			.await
			.map_err(|e| Error::Transport(format!("POST {} failed: {}", self.endpoint, e)))?;

		let status = response.status().as_u16();
		let set_cookie = response
			.headers()
			.get_all(SET_COOKIE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.map(str::to_string)
			.collect();
		let body = response.text().await?;

		trace!(target: "deluge.rpc", endpoint = %self.endpoint, status, bytes = body.len(), "received response");

		Ok(TransportResponse { status, body, set_cookie })
	}
}
