//! Fake transport for testing the gating pipeline without a WebUI.
//!
//! Replies are scripted per method. One-shot replies are consumed in order
//! before falling back to the method's sticky reply; a method with neither
//! fails with a transport error.
//!
//! # Example
//!
//! ```ignore
//! let (transport, controller) = FakeTransportBuilder::new().build();
//! controller.issue_cookie("_session_id=abc");
//! controller.reply("web.connected", json!(true));
//!
//! let client = DelugeClient::with_transport(config, Box::new(transport))?;
//! client.is_connected().await?;
//!
//! assert_eq!(controller.sent_methods(), ["auth.login", "web.connected"]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use super::{Transport, TransportResponse};
use crate::error::{Error, Result};

/// Builder for creating fake transport instances.
pub struct FakeTransportBuilder {
	state: FakeState,
}

impl FakeTransportBuilder {
	pub fn new() -> Self {
		Self { state: FakeState::default() }
	}

	/// Builds the transport and a controller sharing its script and log.
	pub fn build(self) -> (FakeTransport, FakeTransportController) {
		let state = Arc::new(Mutex::new(self.state));
		(FakeTransport { state: Arc::clone(&state) }, FakeTransportController { state })
	}
}

impl Default for FakeTransportBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Request observed by the fake transport.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
	pub id: u64,
	pub method: String,
	pub params: Vec<Value>,
	pub cookie: String,
}

#[derive(Debug, Clone)]
enum ReplyBody {
	Result(Value),
	Error(Value),
	Raw(String),
}

#[derive(Debug, Clone)]
struct FakeReply {
	body: ReplyBody,
	set_cookie: Vec<String>,
}

impl FakeReply {
	fn new(body: ReplyBody) -> Self {
		Self { body, set_cookie: Vec::new() }
	}
}

#[derive(Debug, Default)]
struct FakeState {
	once: HashMap<String, VecDeque<FakeReply>>,
	sticky: HashMap<String, FakeReply>,
	sent: Vec<SentRequest>,
}

impl FakeState {
	fn next_reply(&mut self, method: &str) -> Option<FakeReply> {
		if let Some(reply) = self.once.get_mut(method).and_then(VecDeque::pop_front) {
			return Some(reply);
		}
		self.sticky.get(method).cloned()
	}
}

/// Controller for scripting replies and inspecting sent requests.
pub struct FakeTransportController {
	state: Arc<Mutex<FakeState>>,
}

impl FakeTransportController {
	/// Answers every `method` call with `result`.
	pub fn reply(&self, method: &str, result: Value) {
		self.sticky(method, FakeReply::new(ReplyBody::Result(result)));
	}

	/// Answers the next `method` call with `result`.
	pub fn reply_once(&self, method: &str, result: Value) {
		self.once(method, FakeReply::new(ReplyBody::Result(result)));
	}

	/// Answers every `method` call with a server error payload.
	pub fn reply_error(&self, method: &str, payload: Value) {
		self.sticky(method, FakeReply::new(ReplyBody::Error(payload)));
	}

	/// Answers the next `method` call with a server error payload.
	pub fn reply_error_once(&self, method: &str, payload: Value) {
		self.once(method, FakeReply::new(ReplyBody::Error(payload)));
	}

	/// Answers the next `method` call with a raw, unparsed body.
	pub fn reply_raw_once(&self, method: &str, body: &str) {
		self.once(method, FakeReply::new(ReplyBody::Raw(body.to_string())));
	}

	/// Makes every `auth.login` succeed and hand out `cookie`.
	pub fn issue_cookie(&self, cookie: &str) {
		self.sticky(
			deluge_protocol::methods::AUTH_LOGIN,
			FakeReply {
				body: ReplyBody::Result(json!(true)),
				set_cookie: vec![format!("{cookie}; Expires=Tue, 01 Jan 2030 00:00:00 GMT; Path=/json")],
			},
		);
	}

	/// Makes the next `auth.login` succeed and hand out `cookie`.
	pub fn issue_cookie_once(&self, cookie: &str) {
		self.once(
			deluge_protocol::methods::AUTH_LOGIN,
			FakeReply {
				body: ReplyBody::Result(json!(true)),
				set_cookie: vec![format!("{cookie}; Path=/json")],
			},
		);
	}

	/// All requests sent so far.
	pub fn sent(&self) -> Vec<SentRequest> {
		self.state.lock().sent.clone()
	}

	/// Takes all sent requests, clearing the log.
	pub fn take_sent(&self) -> Vec<SentRequest> {
		std::mem::take(&mut self.state.lock().sent)
	}

	/// Method names of all requests sent so far.
	pub fn sent_methods(&self) -> Vec<String> {
		self.state.lock().sent.iter().map(|r| r.method.clone()).collect()
	}

	fn sticky(&self, method: &str, reply: FakeReply) {
		self.state.lock().sticky.insert(method.to_string(), reply);
	}

	fn once(&self, method: &str, reply: FakeReply) {
		self.state.lock().once.entry(method.to_string()).or_default().push_back(reply);
	}
}

/// In-memory [`Transport`] driven by a [`FakeTransportController`].
pub struct FakeTransport {
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl Transport for FakeTransport {
	async fn post(&self, body: Value, cookie: &str) -> Result<TransportResponse> {
		let method = body["method"].as_str().unwrap_or_default().to_string();
		let id = body["id"].as_u64().unwrap_or_default();
		let params = body["params"].as_array().cloned().unwrap_or_default();

		let mut state = self.state.lock();
		state.sent.push(SentRequest {
			id,
			method: method.clone(),
			params,
			cookie: cookie.to_string(),
		});

		let reply = state
			.next_reply(&method)
			.ok_or_else(|| Error::Transport(format!("no scripted reply for {method}")))?;

		let body = match reply.body {
			ReplyBody::Result(result) => json!({ "id": id, "result": result, "error": null }).to_string(),
			ReplyBody::Error(error) => json!({ "id": id, "result": null, "error": error }).to_string(),
			ReplyBody::Raw(raw) => raw,
		};

		Ok(TransportResponse {
			status: 200,
			body,
			set_cookie: reply.set_cookie,
		})
	}
}
