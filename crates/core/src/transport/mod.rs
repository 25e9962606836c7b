//! Transport boundary for the WebUI endpoint.
//!
//! A transport performs one HTTP POST of a JSON body with a `Cookie` header and
//! hands back the raw body and the `set-cookie` headers. Everything above it
//! (envelopes, ids, error mapping) lives in [`crate::rpc`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod fake;
mod http;

pub use fake::{FakeTransport, FakeTransportBuilder, FakeTransportController, SentRequest};
pub use http::HttpTransport;

/// Raw reply from the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: u16,
	pub body: String,
	/// Every `set-cookie` header value, in received order.
	pub set_cookie: Vec<String>,
}

impl TransportResponse {
	/// Session cookie carried by this response.
	///
	/// Taken from the first `set-cookie` entry, truncated at its first `;`.
	pub fn session_cookie(&self) -> Option<String> {
		let first = self.set_cookie.first()?;
		let cookie = first.split(';').next().unwrap_or_default().trim();
		(!cookie.is_empty()).then(|| cookie.to_string())
	}
}

/// One request/response exchange with the endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
	/// POSTs `body` with `cookie` as the session credential.
	///
	/// An empty `cookie` means no credential is attached.
	async fn post(&self, body: Value, cookie: &str) -> Result<TransportResponse>;
}
