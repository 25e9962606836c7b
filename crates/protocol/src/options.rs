//! Torrent submission payloads.

use serde::{Deserialize, Serialize};

/// Per-torrent options sent with `web.add_torrents`.
///
/// `-1` in the limit fields means "unlimited" to the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentOptions {
	#[serde(default)]
	pub file_priorities: Vec<i64>,
	#[serde(default)]
	pub add_paused: bool,
	#[serde(default)]
	pub compact_allocation: bool,
	pub download_location: String,
	#[serde(default = "unlimited")]
	pub max_connections: i64,
	#[serde(default = "unlimited")]
	pub max_download_speed: i64,
	#[serde(default = "unlimited")]
	pub max_upload_slots: i64,
	#[serde(default = "unlimited")]
	pub max_upload_speed: i64,
	#[serde(default)]
	pub prioritize_first_last_pieces: bool,
}

fn unlimited() -> i64 {
	-1
}

impl TorrentOptions {
	/// Default options record parameterized only by the download location.
	pub fn with_download_location(location: impl Into<String>) -> Self {
		Self {
			file_priorities: Vec::new(),
			add_paused: false,
			compact_allocation: false,
			download_location: location.into(),
			max_connections: unlimited(),
			max_download_speed: unlimited(),
			max_upload_slots: unlimited(),
			max_upload_speed: unlimited(),
			prioritize_first_last_pieces: false,
		}
	}

	pub fn paused(mut self, paused: bool) -> Self {
		self.add_paused = paused;
		self
	}
}

/// Single entry of the `web.add_torrents` parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTorrentEntry {
	/// Magnet link, info-hash, or the temporary path returned by a remote fetch.
	pub path: String,
	pub options: TorrentOptions,
}
