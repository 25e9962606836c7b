//! JSON-RPC request/response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request message posted to the WebUI endpoint.
///
/// ```json
/// { "method": "web.connected", "params": [], "id": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
	/// Method name from the fixed vocabulary in [`crate::methods`].
	pub method: String,
	/// Positional parameters.
	pub params: Vec<Value>,
	/// Request identifier, echoed back by the server.
	pub id: u32,
}

impl Request {
	pub fn new(id: u32, method: impl Into<String>, params: Vec<Value>) -> Self {
		Self {
			method: method.into(),
			params,
			id,
		}
	}
}

/// Response body returned by the WebUI endpoint.
///
/// ```json
/// { "id": 7, "result": true, "error": null }
/// ```
///
/// `error` is `None` both when the field is absent and when it is `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
	#[serde(default)]
	pub id: Option<u32>,
	#[serde(default)]
	pub result: Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<Value>,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn request_serializes_flat_envelope() {
		let request = Request::new(3, "auth.login", vec![json!("secret")]);
		let value = serde_json::to_value(&request).unwrap();
		assert_eq!(value, json!({ "method": "auth.login", "params": ["secret"], "id": 3 }));
	}

	#[test]
	fn null_error_is_treated_as_absent() {
		let response: Response = serde_json::from_str(r#"{"id": 1, "result": true, "error": null}"#).unwrap();
		assert!(response.error.is_none());
		assert_eq!(response.result, json!(true));
	}

	#[test]
	fn error_payload_is_kept_verbatim() {
		let response: Response = serde_json::from_str(r#"{"id": 1, "result": null, "error": {"message": "Not authenticated", "code": 1}}"#).unwrap();
		assert_eq!(response.error, Some(json!({ "message": "Not authenticated", "code": 1 })));
	}

	#[test]
	fn missing_result_defaults_to_null() {
		let response: Response = serde_json::from_str(r#"{"id": 2}"#).unwrap();
		assert!(response.result.is_null());
	}
}
