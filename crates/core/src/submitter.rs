//! Torrent submission pipeline.
//!
//! A reference is either a web URL pointing at a `.torrent` file or an opaque
//! magnet link / info-hash. URLs are fetched by the daemon first (with a
//! cookie from the [`CredentialJar`]) and the id it returns is what gets
//! added; everything else is added as-is.

use deluge_protocol::methods::{WEB_ADD_TORRENTS, WEB_DOWNLOAD_TORRENT_FROM_URL};
use deluge_protocol::{AddTorrentEntry, TorrentOptions};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::cookie_jar::CredentialJar;
use crate::error::{Error, Result};
use crate::session::SessionManager;

/// Where a submitted torrent should go.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Destination {
	/// Default options with the client's configured download location.
	#[default]
	Default,
	/// Default options with this download location.
	Location(String),
	/// Caller-supplied options, sent verbatim.
	Options(TorrentOptions),
}

impl Destination {
	/// Resolves to the options record sent with `web.add_torrents`.
	pub fn into_options(self, default_location: Option<&str>) -> Result<TorrentOptions> {
		match self {
			Destination::Default => default_location
				.map(TorrentOptions::with_download_location)
				.ok_or_else(|| Error::InvalidConfig("no download location configured; pass one explicitly".into())),
			Destination::Location(location) => Ok(TorrentOptions::with_download_location(location)),
			Destination::Options(options) => Ok(options),
		}
	}
}

impl From<&str> for Destination {
	fn from(location: &str) -> Self {
		Destination::Location(location.to_string())
	}
}

impl From<String> for Destination {
	fn from(location: String) -> Self {
		Destination::Location(location)
	}
}

impl From<TorrentOptions> for Destination {
	fn from(options: TorrentOptions) -> Self {
		Destination::Options(options)
	}
}

/// How a torrent reference is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentRef<'a> {
	/// `http(s)` URL of a torrent file; fetched by the daemon first.
	Remote(&'a str),
	/// Magnet link, info-hash or anything else; submitted unchanged.
	Direct(&'a str),
}

impl<'a> TorrentRef<'a> {
	pub fn classify(reference: &'a str) -> Self {
		match Url::parse(reference) {
			Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => TorrentRef::Remote(reference),
			_ => TorrentRef::Direct(reference),
		}
	}
}

/// Runs fetch-if-remote then add for one reference.
///
/// The session must already be ready; gating is the caller's job. Submitting
/// the same reference twice issues two add calls.
pub struct TorrentSubmitter<'a> {
	session: &'a mut SessionManager,
	jar: &'a CredentialJar,
}

impl<'a> TorrentSubmitter<'a> {
	pub fn new(session: &'a mut SessionManager, jar: &'a CredentialJar) -> Self {
		Self { session, jar }
	}

	/// Submits `reference` with `options` and returns the add call's result.
	///
	/// A failed remote fetch is returned as-is and no add call is made.
	pub async fn submit(&mut self, reference: &str, options: TorrentOptions) -> Result<Value> {
		let path = match TorrentRef::classify(reference) {
			TorrentRef::Remote(url) => self.fetch(url).await?,
			TorrentRef::Direct(reference) => reference.to_string(),
		};

		debug!(target: "deluge.submit", %path, location = %options.download_location, "adding torrent");
		let entries = serde_json::to_value([AddTorrentEntry { path, options }])?;
		self.session.call(WEB_ADD_TORRENTS, vec![entries]).await
	}

	async fn fetch(&mut self, url: &str) -> Result<String> {
		let cookie = self.jar.resolve(url);
		debug!(target: "deluge.submit", %url, with_cookie = !cookie.is_empty(), "fetching remote torrent");

		let result = self.session.call(WEB_DOWNLOAD_TORRENT_FROM_URL, vec![json!(url), json!(cookie)]).await?;
		match result {
			Value::String(id) if !id.is_empty() => Ok(id),
			other => Err(Error::MalformedResponse(format!("{WEB_DOWNLOAD_TORRENT_FROM_URL} returned {other}, expected a torrent path"))),
		}
	}
}
