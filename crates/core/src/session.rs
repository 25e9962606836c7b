//! Session and daemon-connectivity gating.
//!
//! The WebUI has two independent failure axes: the login session can expire
//! while the daemon stays attached, and the daemon can drop while the session
//! stays valid. [`SessionManager::ensure_ready`] checks them separately, in
//! that order, before any caller-visible RPC call is issued.
//!
//! ```text
//!                  login ok
//! Unauthenticated ─────────────▶ Authenticated ──┐ check_session ok
//!        ▲                            │    ◀──────┘
//!        └────────────────────────────┘
//!          check_session false / failed (re-login once)
//! ```

use deluge_protocol::methods::{AUTH_CHECK_SESSION, AUTH_LOGIN, WEB_CONNECTED};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::rpc::RpcClient;

/// Authentication state of a client instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
	#[default]
	Unauthenticated,
	/// Logged in at some point; the session may have expired since.
	Authenticated,
}

/// Observable session status. Never exposes the credential itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStatus {
	pub state: SessionState,
	/// Result of the most recent connectivity query, if one ran.
	pub daemon_connected: Option<bool>,
}

#[derive(Debug, Default)]
struct Session {
	state: SessionState,
	credential: String,
	daemon_connected: Option<bool>,
}

impl Session {
	fn invalidate(&mut self) {
		self.state = SessionState::Unauthenticated;
	}
}

enum SessionCheck {
	Valid,
	Expired,
	Failed(Error),
}

/// Owns the login session and gates calls on it.
pub struct SessionManager {
	rpc: RpcClient,
	password: String,
	session: Session,
}

impl SessionManager {
	pub fn new(rpc: RpcClient, password: impl Into<String>) -> Self {
		Self {
			rpc,
			password: password.into(),
			session: Session::default(),
		}
	}

	pub fn state(&self) -> SessionState {
		self.session.state
	}

	pub fn status(&self) -> SessionStatus {
		SessionStatus {
			state: self.session.state,
			daemon_connected: self.session.daemon_connected,
		}
	}

	/// Brings the session to a usable state before a call.
	///
	/// 1. Logs in when unauthenticated.
	/// 2. Otherwise checks the session; an invalid or uncheckable session gets
	///    exactly one re-login.
	/// 3. With `require_daemon`, queries connectivity and fails with
	///    [`Error::DaemonUnavailable`] unless the WebUI reports a daemon.
	///
	/// # Errors
	///
	/// - [`Error::Authentication`] if login fails
	/// - [`Error::DaemonUnavailable`] if connectivity was required and missing
	pub async fn ensure_ready(&mut self, require_daemon: bool) -> Result<()> {
		match self.session.state {
			SessionState::Unauthenticated => self.login().await?,
			SessionState::Authenticated => match self.check_session().await {
				SessionCheck::Valid => {}
				SessionCheck::Expired => {
					info!(target: "deluge.session", "session expired; logging in again");
					self.session.invalidate();
					self.login().await?;
				}
				SessionCheck::Failed(err) => {
					warn!(target: "deluge.session", error = %err, "session check failed; logging in again");
					self.session.invalidate();
					self.login().await?;
				}
			},
		}

		if require_daemon {
			match self.daemon_connected().await {
				Ok(true) => {}
				Ok(false) => return Err(Error::DaemonUnavailable("web UI is not connected to a daemon".into())),
				Err(err) => return Err(Error::DaemonUnavailable(format!("connectivity check failed: {err}"))),
			}
		}

		Ok(())
	}

	/// Queries `web.connected` and records the answer.
	pub async fn daemon_connected(&mut self) -> Result<bool> {
		let result = self.call(WEB_CONNECTED, Vec::new()).await?;
		let connected = result
			.as_bool()
			.ok_or_else(|| Error::MalformedResponse(format!("{WEB_CONNECTED} returned {result}, expected a boolean")))?;
		self.session.daemon_connected = Some(connected);
		debug!(target: "deluge.session", connected, "daemon connectivity");
		Ok(connected)
	}

	/// Issues an authenticated call and returns its `result`.
	///
	/// Fails with [`Error::Authentication`] without touching the network when
	/// no session credential has been obtained yet.
	pub async fn call(&mut self, method: &str, params: Vec<Value>) -> Result<Value> {
		if self.session.credential.is_empty() {
			return Err(Error::Authentication(format!("no session credential for {method}; log in first")));
		}
		let reply = self.rpc.call(method, params, &self.session.credential).await?;
		Ok(reply.result)
	}

	async fn login(&mut self) -> Result<()> {
		let reply = self
			.rpc
			.call(AUTH_LOGIN, vec![json!(self.password)], "")
			.await
			.map_err(|err| Error::Authentication(format!("login failed: {err}")))?;

		if reply.result != Value::Bool(true) {
			warn!(target: "deluge.session", "login rejected");
			return Err(Error::Authentication("password rejected by web UI".into()));
		}

		let Some(cookie) = reply.session_cookie else {
			warn!(target: "deluge.session", "login response carried no session cookie");
			return Err(Error::Authentication("login response carried no session cookie".into()));
		};

		self.session.credential = cookie;
		self.session.state = SessionState::Authenticated;
		info!(target: "deluge.session", "authenticated with web UI");
		Ok(())
	}

	async fn check_session(&mut self) -> SessionCheck {
		match self.call(AUTH_CHECK_SESSION, Vec::new()).await {
			Ok(Value::Bool(true)) => SessionCheck::Valid,
			Ok(_) => SessionCheck::Expired,
			Err(err) => SessionCheck::Failed(err),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::{FakeTransportBuilder, FakeTransportController};

	fn manager() -> (SessionManager, FakeTransportController) {
		let (transport, controller) = FakeTransportBuilder::new().build();
		let rpc = RpcClient::new(Box::new(transport));
		(SessionManager::new(rpc, "deluge"), controller)
	}

	#[tokio::test]
	async fn first_use_logs_in_with_password_and_no_cookie() {
		let (mut session, controller) = manager();
		controller.issue_cookie("_session_id=one");

		session.ensure_ready(false).await.unwrap();

		let sent = controller.take_sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].method, "auth.login");
		assert_eq!(sent[0].params, vec![json!("deluge")]);
		assert_eq!(sent[0].cookie, "");
		assert_eq!(session.state(), SessionState::Authenticated);
	}

	#[tokio::test]
	async fn valid_session_is_reused() {
		let (mut session, controller) = manager();
		controller.issue_cookie("_session_id=one");
		controller.reply("auth.check_session", json!(true));

		session.ensure_ready(false).await.unwrap();
		controller.take_sent();
		session.ensure_ready(false).await.unwrap();

		let sent = controller.take_sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].method, "auth.check_session");
		assert_eq!(sent[0].cookie, "_session_id=one");
	}

	#[tokio::test]
	async fn expired_session_triggers_one_relogin() {
		let (mut session, controller) = manager();
		controller.issue_cookie_once("_session_id=old");
		controller.issue_cookie("_session_id=new");
		controller.reply_once("auth.check_session", json!(false));

		session.ensure_ready(false).await.unwrap();
		session.ensure_ready(false).await.unwrap();
		controller.reply("web.connected", json!(true));
		session.daemon_connected().await.unwrap();

		assert_eq!(controller.sent_methods(), vec!["auth.login", "auth.check_session", "auth.login", "web.connected"]);
		assert_eq!(controller.sent()[3].cookie, "_session_id=new");
	}

	#[tokio::test]
	async fn failed_session_check_also_relogs() {
		let (mut session, controller) = manager();
		controller.issue_cookie("_session_id=one");
		controller.reply_error_once("auth.check_session", json!({ "message": "Unknown method", "code": 2 }));

		session.ensure_ready(false).await.unwrap();
		session.ensure_ready(false).await.unwrap();

		assert_eq!(controller.sent_methods(), vec!["auth.login", "auth.check_session", "auth.login"]);
		assert_eq!(session.state(), SessionState::Authenticated);
	}

	#[tokio::test]
	async fn rejected_login_stays_unauthenticated() {
		let (mut session, controller) = manager();
		controller.reply_once("auth.login", json!(false));

		let err = session.ensure_ready(false).await.unwrap_err();
		assert!(err.is_authentication());
		assert_eq!(session.state(), SessionState::Unauthenticated);

		controller.issue_cookie("_session_id=ok");
		session.ensure_ready(false).await.unwrap();
		assert_eq!(controller.sent_methods(), vec!["auth.login", "auth.login"]);
	}

	#[tokio::test]
	async fn failed_relogin_reports_authentication_error() {
		let (mut session, controller) = manager();
		controller.issue_cookie_once("_session_id=one");
		controller.reply("auth.login", json!(false));
		controller.reply("auth.check_session", json!(false));

		session.ensure_ready(false).await.unwrap();
		let err = session.ensure_ready(true).await.unwrap_err();

		assert!(err.is_authentication());
		assert_eq!(session.state(), SessionState::Unauthenticated);
		assert!(!controller.sent_methods().contains(&"web.connected".to_string()));
	}

	#[tokio::test]
	async fn login_without_cookie_is_rejected() {
		let (mut session, controller) = manager();
		controller.reply("auth.login", json!(true));

		let err = session.ensure_ready(false).await.unwrap_err();
		assert!(err.to_string().contains("no session cookie"));
		assert_eq!(session.state(), SessionState::Unauthenticated);
	}

	#[tokio::test]
	async fn login_transport_failure_is_authentication_error() {
		let (mut session, _controller) = manager();
		let err = session.ensure_ready(false).await.unwrap_err();
		assert!(err.is_authentication());
		assert!(err.to_string().contains("no scripted reply for auth.login"));
	}

	#[tokio::test]
	async fn disconnected_daemon_blocks_gated_call() {
		let (mut session, controller) = manager();
		controller.issue_cookie("_session_id=one");
		controller.reply("web.connected", json!(false));

		let err = session.ensure_ready(true).await.unwrap_err();
		assert!(err.is_daemon_unavailable());
		assert_eq!(session.status().daemon_connected, Some(false));
		assert_eq!(session.state(), SessionState::Authenticated);
	}

	#[tokio::test]
	async fn connectivity_error_is_daemon_unavailable() {
		let (mut session, controller) = manager();
		controller.issue_cookie("_session_id=one");
		controller.reply_error("web.connected", json!({ "message": "boom", "code": 3 }));

		let err = session.ensure_ready(true).await.unwrap_err();
		assert!(err.is_daemon_unavailable());
		assert!(err.to_string().contains("boom"));
	}

	#[tokio::test]
	async fn non_boolean_connectivity_is_malformed() {
		let (mut session, controller) = manager();
		controller.issue_cookie("_session_id=one");
		controller.reply("web.connected", json!("yes"));
		session.ensure_ready(false).await.unwrap();

		assert!(session.daemon_connected().await.unwrap_err().is_malformed());
	}

	#[tokio::test]
	async fn call_before_login_never_reaches_transport() {
		let (mut session, controller) = manager();
		let err = session.call("web.get_hosts", Vec::new()).await.unwrap_err();
		assert!(err.is_authentication());
		assert!(controller.sent().is_empty());
	}
}
