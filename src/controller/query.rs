/* src/controller/query.rs */

//!
//! Dotted-path queries against the live snapshot, falling back to defaults.

use std::sync::Arc;

use super::LiveConfig;
use crate::holder::Snapshot;
use crate::value::{self, Map, TypeMismatch, Value};

impl LiveConfig {
	/// The live snapshot. Holding it keeps that exact document alive, even
	/// across later reloads.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.shared.holder.load()
	}

	/// Runs `f` over the matches for `path` in the live snapshot, or in the
	/// defaults when the snapshot has none.
	fn with_matches<R>(&self, path: &str, f: impl FnOnce(Vec<&Value>) -> R) -> R {
		let live = self.shared.holder.load();
		let found = live.resolve_all(path);
		if !found.is_empty() {
			return f(found);
		}
		let defaults = self.shared.defaults.load();
		f(value::resolve_all(&defaults, path))
	}

	/// The raw node at `path` with no type conversion.
	///
	/// A list stored at `path` is returned whole.
	pub fn get_raw(&self, path: &str) -> Option<Value> {
		let live = self.shared.holder.load();
		if let Some(found) = live.get_raw(path) {
			return Some(found.clone());
		}
		let defaults = self.shared.defaults.load();
		value::lookup(&defaults, path).cloned()
	}

	/// The first value at `path` as text, `Ok(None)` when absent.
	pub fn try_get_string(&self, path: &str) -> Result<Option<String>, TypeMismatch> {
		self.with_matches(path, |found| match found.first() {
			None => Ok(None),
			Some(v) => v
				.to_text()
				.map(Some)
				.ok_or_else(|| TypeMismatch::new(path, "string", v)),
		})
	}

	/// The first value at `path` as a whole number, `Ok(None)` when absent.
	pub fn try_get_int(&self, path: &str) -> Result<Option<i64>, TypeMismatch> {
		self.with_matches(path, |found| match found.first() {
			None => Ok(None),
			Some(v) => v
				.to_int()
				.map(Some)
				.ok_or_else(|| TypeMismatch::new(path, "int", v)),
		})
	}

	/// The first value at `path` as a float, `Ok(None)` when absent.
	pub fn try_get_float(&self, path: &str) -> Result<Option<f64>, TypeMismatch> {
		self.with_matches(path, |found| match found.first() {
			None => Ok(None),
			Some(v) => v
				.to_float()
				.map(Some)
				.ok_or_else(|| TypeMismatch::new(path, "float", v)),
		})
	}

	/// The first value at `path` as text.
	///
	/// Returns an empty string when absent or not text; the latter is logged.
	/// Example: `config.get("spanner.database.path")`.
	pub fn get(&self, path: &str) -> String {
		self.try_get_string(path)
			.unwrap_or_else(|e| {
				log::warn!("Get() {}", e);
				None
			})
			.unwrap_or_default()
	}

	/// The first value at `path` as a whole number; floats are truncated.
	///
	/// Returns zero when absent or not numeric; the latter is logged.
	pub fn get_int(&self, path: &str) -> i64 {
		self.try_get_int(path)
			.unwrap_or_else(|e| {
				log::warn!("GetInt() {}", e);
				None
			})
			.unwrap_or_default()
	}

	/// The first value at `path` as a float.
	///
	/// Returns zero when absent or not a float (integers included); the
	/// latter is logged.
	pub fn get_float(&self, path: &str) -> f64 {
		self.try_get_float(path)
			.unwrap_or_else(|e| {
				log::warn!("GetFloat() {}", e);
				None
			})
			.unwrap_or_default()
	}

	/// Every value at `path` as text, in document order.
	///
	/// Numbers and booleans are rendered as text; nested lists, maps and
	/// nulls are skipped with a warning. Never fails: nothing found is an
	/// empty vector.
	pub fn get_all(&self, path: &str) -> Vec<String> {
		self.with_matches(path, |found| {
			found
				.into_iter()
				.filter_map(|v| {
					let text = v.to_scalar_text();
					if text.is_none() {
						log::warn!("GetAll() {}", TypeMismatch::new(path, "scalar", v));
					}
					text
				})
				.collect()
		})
	}

	/// Every mapping at `path`, in document order. Other values are skipped.
	pub fn get_map_list(&self, path: &str) -> Vec<Map> {
		self.with_matches(path, |found| {
			found.into_iter().filter_map(Value::to_map).collect()
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::loader::MemorySource;

	const YAML: &str = r#"
var1: value1
hash1:
  hash1var1: blah
  hash2:
    hash2var1:
      - "foo"
      - "bar"
    hash2var2: ["foo", "bar"]
    hashlist:
      - key: value
      - key: value2
  intval1: 15
  floatval: 15.5
  nested: [[1, 2], {"x": 1}, 3]
"#;

	async fn loaded(doc: &str) -> LiveConfig {
		let source = MemorySource::new();
		source.insert("test.config", doc);
		let config = LiveConfig::with_source("test.config", source);
		config.load().await.unwrap();
		config
	}

	#[tokio::test]
	async fn test_typed_getters() {
		let config = loaded(YAML).await;
		assert_eq!(config.get("var1"), "value1");
		assert_eq!(config.get("hash1.hash1var1"), "blah");
		assert_eq!(config.get_int("hash1.intval1"), 15);
		assert_eq!(config.get_int("hash1.floatval"), 15);
		assert_eq!(config.get_float("hash1.floatval"), 15.5);
	}

	#[tokio::test]
	async fn test_type_mismatch_is_zero_not_panic() {
		let config = loaded(r#"{"a":{"b":15}}"#).await;
		assert_eq!(config.get_float("a.b"), 0.0);
		assert_eq!(config.get("a.b"), "");
		assert_eq!(config.get_int("a"), 0);

		let err = config.try_get_float("a.b").unwrap_err();
		assert_eq!(err.expected, "float");
		assert_eq!(err.found, "int");
		assert_eq!(config.try_get_float("a.missing"), Ok(None));
	}

	#[tokio::test]
	async fn test_get_all() {
		let config = loaded(YAML).await;
		assert_eq!(config.get_all("hash1.hash2.hash2var1"), vec!["foo", "bar"]);
		assert_eq!(config.get_all("hash1.hash2.hash2var2"), vec!["foo", "bar"]);
		assert_eq!(config.get_all("hash1.hashlist.key"), vec!["value", "value2"]);
		assert_eq!(config.get_all("hash1.intval1"), vec!["15"]);
		assert_eq!(config.get_all("hash1.nested"), vec!["3"]);
		assert!(config.get_all("hash1.missing").is_empty());
	}

	#[tokio::test]
	async fn test_get_map_list() {
		let config = loaded(YAML).await;
		let maps = config.get_map_list("hash1.hashlist");
		assert_eq!(maps.len(), 2);
		assert_eq!(maps[0]["key"], Value::from("value"));
		assert_eq!(maps[1]["key"], Value::from("value2"));

		// Non-map matches are skipped.
		assert_eq!(config.get_map_list("hash1.nested").len(), 1);
		assert!(config.get_map_list("var1").is_empty());
		assert!(config.get_map_list("nope").is_empty());
	}

	#[tokio::test]
	async fn test_get_raw_returns_whole_list() {
		let config = loaded(YAML).await;
		assert_eq!(
			config.get_raw("hash1.hash2.hash2var1"),
			Some(Value::from(vec!["foo", "bar"]))
		);
		assert_eq!(config.get("hash1.hash2.hash2var1"), "foo");
		assert_eq!(config.get_raw("hash1.missing"), None);
	}

	#[tokio::test]
	async fn test_defaults_fallback() {
		let source = std::sync::Arc::new(MemorySource::new());
		source.insert("test.config", r#"{"a":1}"#);
		let config = LiveConfig::with_source("test.config", std::sync::Arc::clone(&source));
		config.set_default("x.y", "fallback");
		config.set_default("list", vec!["d1", "d2"]);
		config.load().await.unwrap();

		assert_eq!(config.get("x.y"), "fallback");
		assert_eq!(config.get_raw("x.y"), Some(Value::from("fallback")));
		assert_eq!(config.get_all("list"), vec!["d1", "d2"]);

		source.insert("test.config", r#"{"a":1,"x":{"y":"document"}}"#);
		config.reload().await.unwrap();
		assert_eq!(config.get("x.y"), "document");
	}

	#[tokio::test]
	async fn test_bytes_default_read_as_text() {
		let config = loaded("{}").await;
		config.set_default("raw", b"bytes".to_vec());
		assert_eq!(config.get("raw"), "bytes");
	}
}
