/* src/signal/mod.rs */

//!
//! Filesystem change notification and the debounce loop that turns bursts of
//! raw events into single reload triggers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

mod channel;
#[cfg(feature = "signal")]
mod fs;
mod worker;

pub use channel::{ChangeSender, ChannelNotifier};
#[cfg(feature = "signal")]
pub use fs::FsNotifier;
pub(crate) use worker::debounce;

/// Custom error type for the signal module.
#[derive(thiserror::Error, Debug)]
pub enum SignalError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[cfg(feature = "signal")]
	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("Invalid configuration: {0}")]
	Config(String),

	#[error("change notification channel is closed")]
	Closed,
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Configuration for the watcher behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
	/// Quiet period after the most recent event before a reload fires.
	pub debounce: Duration,

	/// Specific event kinds to react to. `None` reacts to all of them.
	pub listen_events: Option<Vec<EventKind>>,
}

impl WatchConfig {
	pub fn with_debounce(mut self, debounce: Duration) -> Self {
		self.debounce = debounce;
		self
	}

	pub(crate) fn accepts(&self, kind: EventKind) -> bool {
		match &self.listen_events {
			None => true,
			Some(list) => list.contains(&kind),
		}
	}
}

impl Default for WatchConfig {
	fn default() -> Self {
		Self {
			debounce: Duration::from_secs(1),
			listen_events: None,
		}
	}
}

/// The kind of filesystem event we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// File was created.
	Create,
	/// File content was modified.
	Modify,
	/// File was removed.
	Remove,
}

/// A simplified, high-level filesystem event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
	/// The path(s) involved in the event.
	pub paths: Vec<PathBuf>,
	pub kind: EventKind,
}

impl ChangeEvent {
	pub fn new(path: impl Into<PathBuf>, kind: EventKind) -> Self {
		Self {
			paths: vec![path.into()],
			kind,
		}
	}
}

/// A source of change notifications for a single path.
///
/// Dropping the notifier releases the subscription.
pub trait Notifier: Send + 'static {
	/// Starts delivering events for `path`. Fails if the subscription cannot
	/// be established, e.g. because the path does not exist.
	fn subscribe(&mut self, path: &Path) -> Result<mpsc::Receiver<ChangeEvent>>;

	/// Re-arms the subscription after an event.
	///
	/// Some backends deliver a one-shot subscription per inode. This must be
	/// idempotent and must tolerate the path being briefly absent.
	fn rearm(&mut self, path: &Path) -> Result<()>;
}
