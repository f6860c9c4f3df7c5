/* src/signal/channel.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use super::{ChangeEvent, EventKind, Notifier, Result, SignalError};

/// A notifier fed by hand through a [`ChangeSender`].
///
/// Useful when change detection lives elsewhere (a control socket, a
/// deployment hook) and in tests. The subscription closes once every sender
/// is dropped.
#[derive(Debug)]
pub struct ChannelNotifier {
	rx: Option<mpsc::Receiver<ChangeEvent>>,
	rearms: Arc<AtomicUsize>,
}

/// Sending half of a [`ChannelNotifier`].
#[derive(Debug, Clone)]
pub struct ChangeSender {
	tx: mpsc::Sender<ChangeEvent>,
	rearms: Arc<AtomicUsize>,
}

impl ChannelNotifier {
	/// Creates a notifier buffering up to `capacity` pending events.
	pub fn channel(capacity: usize) -> (Self, ChangeSender) {
		let (tx, rx) = mpsc::channel(capacity);
		let rearms = Arc::new(AtomicUsize::new(0));
		(
			Self {
				rx: Some(rx),
				rearms: Arc::clone(&rearms),
			},
			ChangeSender { tx, rearms },
		)
	}
}

impl Notifier for ChannelNotifier {
	fn subscribe(&mut self, _path: &Path) -> Result<mpsc::Receiver<ChangeEvent>> {
		self.rx
			.take()
			.ok_or_else(|| SignalError::Config("channel notifier already subscribed".to_string()))
	}

	fn rearm(&mut self, _path: &Path) -> Result<()> {
		self.rearms.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

impl ChangeSender {
	/// Delivers `event` to the subscriber.
	pub async fn send(&self, event: ChangeEvent) -> Result<()> {
		self.tx.send(event).await.map_err(|_| SignalError::Closed)
	}

	/// Delivers a modify event for `path`.
	pub async fn touch(&self, path: impl Into<PathBuf>) -> Result<()> {
		self.send(ChangeEvent::new(path, EventKind::Modify)).await
	}

	/// Number of times the subscriber re-armed the subscription.
	pub fn rearm_count(&self) -> usize {
		self.rearms.load(Ordering::SeqCst)
	}

	/// Whether the subscriber has gone away.
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}
