//! Credential jar for third-party torrent downloads.
//!
//! Maps URL prefixes to cookie strings. When the daemon is asked to fetch a
//! torrent file from a remote URL, the first entry whose prefix matches the
//! URL supplies the cookie sent along with the fetch.

use serde_json::Value;

use crate::error::{Error, Result};

/// Ordered prefix → cookie mapping.
///
/// Entries are kept in insertion order and matched by plain string prefix,
/// not by URL structure. The first match wins, so a broad prefix inserted
/// before a narrower one shadows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialJar {
	entries: Vec<(String, String)>,
}

impl CredentialJar {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a jar from a JSON object of string values.
	///
	/// Entries keep the order the keys were written in.
	pub fn from_json(value: &Value) -> Result<Self> {
		let Value::Object(map) = value else {
			return Err(Error::InvalidConfig(format!("credential jar must be an object of prefix to cookie strings, got {}", json_kind(value))));
		};

		let mut entries = Vec::with_capacity(map.len());
		for (prefix, cookie) in map {
			let Value::String(cookie) = cookie else {
				return Err(Error::InvalidConfig(format!("credential for prefix {prefix:?} must be a string, got {}", json_kind(cookie))));
			};
			entries.push((prefix.clone(), cookie.clone()));
		}
		Ok(Self { entries })
	}

	/// Returns the cookie for the first prefix `url` starts with, or `""`.
	pub fn resolve(&self, url: &str) -> &str {
		self.entries
			.iter()
			.find(|(prefix, _)| url.starts_with(prefix.as_str()))
			.map(|(_, cookie)| cookie.as_str())
			.unwrap_or("")
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered prefixes in match order.
	pub fn prefixes(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(prefix, _)| prefix.as_str())
	}
}

impl<K, V> FromIterator<(K, V)> for CredentialJar
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn first_registered_prefix_wins() {
		let jar: CredentialJar = [("http://a.example/", "C1"), ("http://a.example/x/", "C2")].into_iter().collect();
		assert_eq!(jar.resolve("http://a.example/x/file"), "C1");
	}

	#[test]
	fn narrower_prefix_wins_when_registered_first() {
		let jar: CredentialJar = [("http://a.example/x/", "C2"), ("http://a.example/", "C1")].into_iter().collect();
		assert_eq!(jar.resolve("http://a.example/x/file"), "C2");
		assert_eq!(jar.resolve("http://a.example/y"), "C1");
	}

	#[test]
	fn no_match_resolves_empty() {
		let jar: CredentialJar = [("https://tracker.example/", "uid=1")].into_iter().collect();
		assert_eq!(jar.resolve("http://tracker.example/file.torrent"), "");
		assert_eq!(CredentialJar::new().resolve("http://anything"), "");
	}

	#[test]
	fn matching_is_ordinal_not_structural() {
		let jar: CredentialJar = [("http://host.example", "c")].into_iter().collect();
		assert_eq!(jar.resolve("http://host.example.evil/file"), "c");
		assert_eq!(jar.resolve("HTTP://host.example/file"), "");
	}

	#[test]
	fn from_json_keeps_written_order() {
		let jar = CredentialJar::from_json(&json!({
			"http://a.example/x/": "C2",
			"http://a.example/": "C1"
		}))
		.unwrap();
		assert_eq!(jar.prefixes().collect::<Vec<_>>(), vec!["http://a.example/x/", "http://a.example/"]);
		assert_eq!(jar.resolve("http://a.example/x/file"), "C2");
		assert_eq!(jar.resolve("http://a.example/y/file"), "C1");

		let parsed: Value = serde_json::from_str(r#"{"http://a.example/": "C1", "http://a.example/x/": "C2"}"#).unwrap();
		let jar = CredentialJar::from_json(&parsed).unwrap();
		assert_eq!(jar.resolve("http://a.example/x/file"), "C1");
	}

	#[test]
	fn from_json_rejects_non_objects() {
		for value in [Value::Null, json!("not-an-object"), json!(["a", "b"]), json!(7)] {
			let err = CredentialJar::from_json(&value).unwrap_err();
			assert!(err.is_invalid_config(), "{value} should be rejected");
		}
	}

	#[test]
	fn from_json_rejects_non_string_values() {
		let err = CredentialJar::from_json(&json!({ "http://a/": 1 })).unwrap_err();
		assert!(err.to_string().contains("must be a string"));
	}
}
