/* src/loader/format/mod.rs */

use serde::de::DeserializeOwned;

use super::FmtError;
use crate::value::Value;

mod json;
mod yaml;

pub use json::Json;
pub use yaml::Yaml;

/// Abstract format parser that converts bytes into a structured object.
pub trait Format: Send + Sync {
	/// Short identifier used in diagnostics.
	fn name(&self) -> &'static str;

	/// Parse the raw bytes into the target type.
	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError>;
}

/// Parses a configuration document, trying JSON first and YAML second.
///
/// A document valid in both dialects is therefore always read as JSON. The
/// top level must be a mapping; an empty document (blank or comments only)
/// reads as an empty mapping.
pub fn parse_document(input: &[u8]) -> Result<Value, FmtError> {
	let (mut tree, format) = match Json.parse::<Value>(input) {
		Ok(tree) => (tree, Json.name()),
		Err(json_err) => match Yaml.parse::<Value>(input) {
			Ok(tree) => (tree, Yaml.name()),
			Err(yaml_err) => {
				return Err(FmtError::Unrecognized {
					json: json_err.to_string(),
					yaml: yaml_err.to_string(),
				});
			}
		},
	};

	if matches!(tree, Value::Null) {
		tree = Value::map();
	}
	if !tree.is_map() {
		return Err(FmtError::NotAMapping(tree.kind()));
	}
	log::debug!("parsed {} byte document as {}", input.len(), format);
	Ok(tree)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::lookup;

	#[test]
	fn test_parse_json() {
		let tree = parse_document(br#"{"a":{"b":15}}"#).unwrap();
		assert_eq!(lookup(&tree, "a.b"), Some(&Value::Int(15)));
	}

	#[test]
	fn test_parse_yaml_fallback() {
		let tree = parse_document(b"a:\n  b: 15.5\n").unwrap();
		assert_eq!(lookup(&tree, "a.b"), Some(&Value::Float(15.5)));
	}

	#[test]
	fn test_json_wins_when_ambiguous() {
		// Valid JSON is also valid YAML; the JSON reading must be used.
		let tree = parse_document(br#"{"n": 1e3}"#).unwrap();
		assert_eq!(lookup(&tree, "n"), Some(&Value::Float(1000.0)));
	}

	#[test]
	fn test_scalar_document_rejected() {
		let err = parse_document(b"blahblah").unwrap_err();
		assert!(matches!(err, FmtError::NotAMapping("string")));
	}

	#[test]
	fn test_empty_document_is_empty_map() {
		assert_eq!(parse_document(b"").unwrap(), Value::map());
		assert_eq!(parse_document(b"# only a comment\n").unwrap(), Value::map());

		let err = parse_document(b"- a\n- b\n").unwrap_err();
		assert!(matches!(err, FmtError::NotAMapping("list")));
	}

	#[test]
	fn test_yaml_merge_keys_applied() {
		let doc = b"base: &b\n  x: 1\n  y: 1\nderived:\n  <<: *b\n  y: 2\n";
		let tree = parse_document(doc).unwrap();
		assert_eq!(lookup(&tree, "derived.x"), Some(&Value::Int(1)));
		// Explicit keys win over merged ones.
		assert_eq!(lookup(&tree, "derived.y"), Some(&Value::Int(2)));
		assert_eq!(lookup(&tree, "derived.<<"), None);
	}

	#[test]
	fn test_garbage_rejected() {
		let err = parse_document(b"{ not: [valid").unwrap_err();
		assert!(matches!(err, FmtError::Unrecognized { .. }));
	}
}
