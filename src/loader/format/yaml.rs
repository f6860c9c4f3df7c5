/* src/loader/format/yaml.rs */

use serde::de::DeserializeOwned;

use super::super::FmtError;
use super::Format;

/// YAML format parser using `serde_yaml`.
///
/// Merge keys (`<<: *anchor`) are expanded before conversion.
pub struct Yaml;

impl Format for Yaml {
	fn name(&self) -> &'static str {
		"yaml"
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		let mut doc: serde_yaml::Value =
			serde_yaml::from_slice(input).map_err(|e| FmtError::ParseError(e.to_string()))?;
		doc.apply_merge()
			.map_err(|e| FmtError::ParseError(e.to_string()))?;
		serde_yaml::from_value(doc).map_err(|e| FmtError::ParseError(e.to_string()))
	}
}
