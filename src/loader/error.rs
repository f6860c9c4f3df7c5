/* src/loader/error.rs */

use std::path::PathBuf;

/// Errors raised while reading or parsing a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum FmtError {
	/// Parsing error from a format implementation.
	#[error("parse error: {0}")]
	ParseError(String),

	/// Neither JSON nor YAML accepted the document.
	#[error("not valid JSON ({json}) or YAML ({yaml})")]
	Unrecognized { json: String, yaml: String },

	/// The document parsed, but its top level is not a mapping.
	#[error("top-level document must be a mapping, got {0}")]
	NotAMapping(&'static str),

	/// Resource not found.
	#[error("not found: {0:?}")]
	NotFound(PathBuf),

	/// IO error from source.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}
