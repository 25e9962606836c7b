//! Result shapes returned by WebUI methods.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Daemon entry known to the WebUI, as returned by `web.get_hosts`.
///
/// The WebUI sends each host as a positional array `[id, ip, port, status]`;
/// older releases omit the status. Object form is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
	pub id: String,
	pub ip: String,
	pub port: u16,
	pub status: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHost {
	Full(String, String, u16, String),
	Short(String, String, u16),
	Object {
		id: String,
		ip: String,
		port: u16,
		#[serde(default)]
		status: Option<String>,
	},
}

impl<'de> Deserialize<'de> for HostEntry {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let host = match RawHost::deserialize(deserializer)? {
			RawHost::Full(id, ip, port, status) => HostEntry { id, ip, port, status },
			RawHost::Short(id, ip, port) => HostEntry {
				id,
				ip,
				port,
				status: String::new(),
			},
			RawHost::Object { id, ip, port, status } => HostEntry {
				id,
				ip,
				port,
				status: status.unwrap_or_default(),
			},
		};
		Ok(host)
	}
}

/// Snapshot returned by `web.update_ui`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiUpdate {
	#[serde(default)]
	pub connected: bool,
	/// Torrent id to requested status fields.
	#[serde(default)]
	pub torrents: HashMap<String, Value>,
	#[serde(default)]
	pub stats: Value,
	#[serde(default)]
	pub filters: Value,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn host_parses_from_positional_array() {
		let hosts: Vec<HostEntry> = serde_json::from_value(json!([["c8a5", "127.0.0.1", 58846, "Online"]])).unwrap();
		assert_eq!(
			hosts[0],
			HostEntry {
				id: "c8a5".into(),
				ip: "127.0.0.1".into(),
				port: 58846,
				status: "Online".into(),
			}
		);
	}

	#[test]
	fn host_without_status_parses() {
		let host: HostEntry = serde_json::from_value(json!(["c8a5", "10.0.0.2", 58846])).unwrap();
		assert_eq!(host.status, "");
	}

	#[test]
	fn host_parses_from_object() {
		let host: HostEntry = serde_json::from_value(json!({ "id": "a", "ip": "::1", "port": 1, "status": "Offline" })).unwrap();
		assert_eq!(host.ip, "::1");
		assert_eq!(host.status, "Offline");
	}

	#[test]
	fn ui_update_tolerates_missing_sections() {
		let update: UiUpdate = serde_json::from_value(json!({ "connected": true, "torrents": { "abc": { "name": "x" } } })).unwrap();
		assert!(update.connected);
		assert_eq!(update.torrents["abc"]["name"], "x");
		assert!(update.stats.is_null());
	}
}
