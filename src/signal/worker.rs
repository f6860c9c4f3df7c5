/* src/signal/worker.rs */

use std::future::Future;
use std::ops::ControlFlow;
use std::path::PathBuf;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep};

use super::{ChangeEvent, Notifier, WatchConfig};

/// Waits for change events on `path` and calls `on_fire` once per quiet period.
///
/// Every accepted event pushes the single pending deadline back to
/// `config.debounce` from now; a burst of events therefore yields one call.
/// The loop ends when `cancel` flips to `true` or its sender is dropped,
/// when the event channel closes, or when `on_fire` breaks. The notifier is
/// dropped on exit, releasing the subscription.
pub(crate) async fn debounce<N, F, Fut>(
	mut notifier: N,
	path: PathBuf,
	mut events: mpsc::Receiver<ChangeEvent>,
	config: WatchConfig,
	mut cancel: watch::Receiver<bool>,
	mut on_fire: F,
) where
	N: Notifier,
	F: FnMut() -> Fut,
	Fut: Future<Output = ControlFlow<()>>,
{
	if *cancel.borrow() {
		return;
	}

	let timer = sleep(config.debounce);
	tokio::pin!(timer);
	let mut armed = false;

	loop {
		tokio::select! {
			biased;

			changed = cancel.changed() => {
				if changed.is_err() || *cancel.borrow() {
					tracing::debug!(path = ?path, "watch cancelled");
					break;
				}
			}
			maybe_event = events.recv() => {
				match maybe_event {
					Some(event) => {
						if let Err(e) = notifier.rearm(&path) {
							tracing::debug!(path = ?path, "re-arming watch failed: {}", e);
						}
						if config.accepts(event.kind) {
							timer.as_mut().reset(Instant::now() + config.debounce);
							armed = true;
						}
					}
					None => {
						tracing::warn!(path = ?path, "change notifications closed, watcher ended");
						break;
					}
				}
			}
			() = &mut timer, if armed => {
				armed = false;
				if on_fire().await.is_break() {
					break;
				}
			}
		}
	}

	drop(notifier);
}
