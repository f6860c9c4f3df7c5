/* src/controller/error.rs */

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::FmtError;
use crate::signal::SignalError;
use crate::validate::ValidationError;

/// Errors that can occur in the LiveConfig controller.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("couldn't read config file {path:?}: {source}")]
	Read { path: PathBuf, source: FmtError },

	/// The file was read but is neither a JSON nor a YAML mapping.
	#[error("couldn't parse config {path:?}: {source}")]
	Parse { path: PathBuf, source: FmtError },

	/// A validator rejected the document.
	#[error("config rejected: {0}")]
	Validation(#[from] ValidationError),

	/// The change subscription could not be established.
	#[error("couldn't create config watcher: {0}")]
	WatchSetup(#[from] SignalError),

	#[error("Builder error: {0}")]
	Builder(String),
}

impl ConfigError {
	/// The validator failure behind this error, if that is what it is.
	pub fn validation(&self) -> Option<&ValidationError> {
		match self {
			ConfigError::Validation(e) => Some(e),
			_ => None,
		}
	}
}
