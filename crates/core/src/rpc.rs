//! JSON-RPC call layer for the WebUI endpoint.
//!
//! This module turns a method name and positional params into one transport
//! exchange. It handles:
//! - Tagging each request with an id from the [`RequestIdSequencer`]
//! - Parsing the response envelope
//! - Mapping a non-null `error` field to [`Error::Rpc`]
//! - Surfacing the session cookie from `set-cookie`
//!
//! # Message Flow
//!
//! 1. Caller invokes [`RpcClient::call`] with method, params and credential
//! 2. The next request id is drawn and the envelope is serialized
//! 3. The envelope is POSTed via the transport with the credential as `Cookie`
//! 4. The body is parsed; unparseable bodies become [`Error::MalformedResponse`]
//! 5. A non-null `error` becomes [`Error::Rpc`], otherwise `result` is returned
//!
//! No retries happen here; retry policy belongs to the session layer.

use deluge_protocol::{Request, Response};
use serde_json::Value;
use tracing::trace;

use crate::error::{Error, Result};
use crate::sequencer::RequestIdSequencer;
use crate::transport::{Transport, TransportResponse};

/// Successful call outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
	pub result: Value,
	/// Session cookie handed out with this response, if any.
	pub session_cookie: Option<String>,
}

/// Single-endpoint JSON-RPC caller.
///
/// Calls are strictly request/response; `&mut self` keeps one call in flight
/// per client, which is what lets request ids wrap without collision checks.
pub struct RpcClient {
	transport: Box<dyn Transport>,
	ids: RequestIdSequencer,
}

impl RpcClient {
	pub fn new(transport: Box<dyn Transport>) -> Self {
		Self::with_sequencer(transport, RequestIdSequencer::new())
	}

	pub fn with_sequencer(transport: Box<dyn Transport>, ids: RequestIdSequencer) -> Self {
		Self { transport, ids }
	}

	/// Issues `method` with `params`, attaching `credential` as the cookie.
	///
	/// # Errors
	///
	/// - [`Error::Transport`] if the HTTP exchange fails
	/// - [`Error::MalformedResponse`] if the body is not a JSON-RPC envelope
	/// - [`Error::Rpc`] if the server reports an error
	pub async fn call(&mut self, method: &str, params: Vec<Value>, credential: &str) -> Result<RpcReply> {
		let id = self.ids.next_id();
		let request = Request::new(id, method, params);
		let body = serde_json::to_value(&request)?;

		trace!(target: "deluge.rpc", id, method, "sending request");
		let response = self.transport.post(body, credential).await?;
		let session_cookie = response.session_cookie();
		let envelope = parse_envelope(method, &response)?;

		if let Some(payload) = envelope.error {
			trace!(target: "deluge.rpc", id, method, error = %payload, "server returned error");
			return Err(Error::Rpc {
				method: method.to_string(),
				payload,
			});
		}

		Ok(RpcReply {
			result: envelope.result,
			session_cookie,
		})
	}
}

fn parse_envelope(method: &str, response: &TransportResponse) -> Result<Response> {
	let malformed = |detail: String| Error::MalformedResponse(format!("{} (HTTP {}): {}", method, response.status, detail));

	// Derived struct visitors also accept sequences, so `[1, true]` would
	// otherwise decode positionally into a successful envelope.
	let value: Value = serde_json::from_str(&response.body).map_err(|e| malformed(e.to_string()))?;
	if !value.is_object() {
		return Err(malformed(format!("expected a JSON object, got {value}")));
	}
	serde_json::from_value::<Response>(value).map_err(|e| malformed(e.to_string()))
}
