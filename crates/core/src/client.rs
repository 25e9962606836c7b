//! Public client facade.
//!
//! Every network operation runs [`SessionManager::ensure_ready`] first. Only
//! [`DelugeClient::add`] and [`DelugeClient::update_ui`] require an attached
//! daemon; host listing, connecting and the connectivity query itself work
//! against the WebUI alone.
//!
//! Calls on one client are serialized: the session lock is held across the
//! gating steps and the call they guard, so concurrent callers never race
//! each other into duplicate logins.

use deluge_protocol::methods::{WEB_CONNECT, WEB_GET_HOSTS, WEB_UPDATE_UI};
use deluge_protocol::{HostEntry, UiUpdate};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing::info;

use crate::config::ClientConfig;
use crate::cookie_jar::CredentialJar;
use crate::error::Result;
use crate::rpc::RpcClient;
use crate::session::{SessionManager, SessionStatus};
use crate::submitter::{Destination, TorrentSubmitter};
use crate::transport::{HttpTransport, Transport};

/// Session-aware client for one WebUI endpoint.
///
/// All state (session, credential jar, request ids) belongs to this instance;
/// independent clients share nothing.
pub struct DelugeClient {
	session: tokio::sync::Mutex<SessionManager>,
	jar: Mutex<CredentialJar>,
	download_location: Option<String>,
}

impl DelugeClient {
	/// Creates a client talking HTTP to `config.url`.
	///
	/// No request is sent until the first operation.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let transport = HttpTransport::new(config.endpoint()?, config.timeout)?;
		Ok(Self::with_transport(config, Box::new(transport)))
	}

	/// Creates a client over an arbitrary transport.
	pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
		let ClientConfig {
			password, download_location, ..
		} = config;
		Self {
			session: tokio::sync::Mutex::new(SessionManager::new(RpcClient::new(transport), password)),
			jar: Mutex::new(CredentialJar::new()),
			download_location,
		}
	}

	/// Authenticates if needed and optionally checks for an attached daemon.
	pub async fn ready(&self, require_daemon: bool) -> Result<()> {
		self.session.lock().await.ensure_ready(require_daemon).await
	}

	/// Submits a magnet link, info-hash or torrent URL.
	///
	/// Fails with [`Error::DaemonUnavailable`](crate::Error::DaemonUnavailable)
	/// without sending anything to the daemon when no daemon is attached.
	pub async fn add(&self, reference: &str, destination: impl Into<Destination>) -> Result<Value> {
		let destination: Destination = destination.into();
		let options = destination.into_options(self.download_location.as_deref())?;

		let mut session = self.session.lock().await;
		session.ensure_ready(true).await?;

		let jar = self.jar.lock().clone();
		let result = TorrentSubmitter::new(&mut session, &jar).submit(reference, options).await?;
		info!(target: "deluge.client", %reference, "torrent submitted");
		Ok(result)
	}

	/// Lists daemons known to the WebUI.
	pub async fn get_hosts(&self) -> Result<Vec<HostEntry>> {
		let mut session = self.session.lock().await;
		session.ensure_ready(false).await?;
		let result = session.call(WEB_GET_HOSTS, Vec::new()).await?;
		Ok(serde_json::from_value(result)?)
	}

	/// Asks the WebUI to attach to `host_id` and reports whether it did.
	///
	/// The connect call's own success says nothing about the daemon accepting
	/// the link, so connectivity is queried afterwards and returned.
	pub async fn connect(&self, host_id: &str) -> Result<bool> {
		let mut session = self.session.lock().await;
		session.ensure_ready(false).await?;
		session.call(WEB_CONNECT, vec![json!(host_id)]).await?;
		let connected = session.daemon_connected().await?;
		info!(target: "deluge.client", %host_id, connected, "connect requested");
		Ok(connected)
	}

	/// Whether the WebUI currently has a daemon attached.
	pub async fn is_connected(&self) -> Result<bool> {
		let mut session = self.session.lock().await;
		session.ensure_ready(false).await?;
		session.daemon_connected().await
	}

	/// Fetches torrent status fields `keys` for torrents matching `filter`.
	pub async fn update_ui(&self, keys: &[&str], filter: Value) -> Result<UiUpdate> {
		let mut session = self.session.lock().await;
		session.ensure_ready(true).await?;
		let result = session.call(WEB_UPDATE_UI, vec![json!(keys), filter]).await?;
		Ok(serde_json::from_value(result)?)
	}

	/// Replaces the credential jar; entries match in the given order.
	pub fn set_credentials<I, K, V>(&self, jar: I)
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		*self.jar.lock() = jar.into_iter().collect();
	}

	/// Replaces the credential jar from a JSON object of strings.
	///
	/// On [`Error::InvalidConfig`](crate::Error::InvalidConfig) the current jar is kept.
	pub fn set_credentials_json(&self, jar: &Value) -> Result<()> {
		let jar = CredentialJar::from_json(jar)?;
		*self.jar.lock() = jar;
		Ok(())
	}

	/// Snapshot of the current credential jar.
	pub fn credentials(&self) -> CredentialJar {
		self.jar.lock().clone()
	}

	pub async fn session_status(&self) -> SessionStatus {
		self.session.lock().await.status()
	}
}
