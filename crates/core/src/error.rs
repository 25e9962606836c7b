//! Error taxonomy for the Deluge client.

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Login rejected or the session could not be re-established.
	///
	/// Fatal to the current call only; the next call logs in again.
	#[error("authentication failed: {0}")]
	Authentication(String),

	/// The WebUI has no usable daemon link for a connectivity-gated call.
	#[error("daemon unavailable: {0}")]
	DaemonUnavailable(String),

	/// The server answered with a non-null `error` field.
	#[error("{method} failed: {}", rpc_message(.payload))]
	Rpc { method: String, payload: Value },

	/// The response body was not a JSON-RPC envelope.
	#[error("malformed response: {0}")]
	MalformedResponse(String),

	/// Rejected configuration or credential jar.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// HTTP-level failure below the JSON-RPC layer.
	#[error("transport error: {0}")]
	Transport(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

fn rpc_message(payload: &Value) -> String {
	match payload.get("message").and_then(Value::as_str) {
		Some(message) => message.to_string(),
		None => payload.to_string(),
	}
}

impl Error {
	pub fn is_authentication(&self) -> bool {
		matches!(self, Error::Authentication(_))
	}

	pub fn is_daemon_unavailable(&self) -> bool {
		matches!(self, Error::DaemonUnavailable(_))
	}

	pub fn is_rpc(&self) -> bool {
		matches!(self, Error::Rpc { .. })
	}

	pub fn is_malformed(&self) -> bool {
		matches!(self, Error::MalformedResponse(_))
	}

	pub fn is_invalid_config(&self) -> bool {
		matches!(self, Error::InvalidConfig(_))
	}

	/// Server error payload, for [`Error::Rpc`].
	pub fn rpc_payload(&self) -> Option<&Value> {
		match self {
			Error::Rpc { payload, .. } => Some(payload),
			_ => None,
		}
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Error::Transport(err.to_string())
	}
}
