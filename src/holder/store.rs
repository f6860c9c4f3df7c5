/* src/holder/store.rs */

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;

#[cfg(feature = "events")]
use super::HoldEvent;
use super::Snapshot;

/// Default event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Holds the live snapshot.
///
/// Readers take an `Arc` to the current snapshot without blocking; a commit
/// is a single atomic pointer swap, so a reader sees either the previous
/// document or the new one in full.
pub struct Holder {
	inner: ArcSwap<Snapshot>,
	version: AtomicU64,
	#[cfg(feature = "events")]
	events: tokio::sync::broadcast::Sender<HoldEvent>,
}

impl Holder {
	/// Creates a holder around the unpublished, empty snapshot for `source`.
	pub fn new(source: impl Into<PathBuf>) -> Self {
		Self {
			inner: ArcSwap::from_pointee(Snapshot::empty(source)),
			version: AtomicU64::new(0),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Returns the live snapshot. This is a wait-free operation.
	pub fn load(&self) -> Arc<Snapshot> {
		self.inner.load_full()
	}

	/// Publishes `candidate` as the live snapshot, returning it.
	///
	/// Marks the candidate loaded and stamps the next version before the swap.
	pub fn commit(&self, candidate: Snapshot) -> Arc<Snapshot> {
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let new = Arc::new(candidate.publish(version));
		let old = self.inner.swap(Arc::clone(&new));

		#[cfg(feature = "events")]
		{
			let event = if old.loaded() {
				HoldEvent::Updated {
					old,
					new: Arc::clone(&new),
				}
			} else {
				HoldEvent::Loaded {
					snapshot: Arc::clone(&new),
				}
			};
			let _ = self.events.send(event);
		}

		#[cfg(not(feature = "events"))]
		{
			let _ = old;
		}

		new
	}

	/// Reports a refused candidate to subscribers.
	#[cfg_attr(not(feature = "events"), allow(unused_variables))]
	pub fn reject(&self, source: PathBuf, reason: String) {
		#[cfg(feature = "events")]
		{
			let _ = self.events.send(HoldEvent::Rejected { source, reason });
		}
	}

	/// Subscribes to reload events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HoldEvent> {
		self.events.subscribe()
	}
}

impl std::fmt::Debug for Holder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Holder")
			.field("version", &self.version.load(Ordering::SeqCst))
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Value;

	#[test]
	fn test_commit_swaps_whole_snapshot() {
		let holder = Holder::new("c.json");
		let before = holder.load();
		assert!(!before.loaded());

		let mut candidate = Snapshot::candidate("c.json", Value::map());
		candidate.set("a", 1);
		let live = holder.commit(candidate);

		assert!(live.loaded());
		assert_eq!(live.version(), 1);
		assert_eq!(holder.load().get_raw("a"), Some(&Value::Int(1)));
		// A reader holding the old Arc still sees the old document.
		assert!(before.get_raw("a").is_none());
	}

	#[cfg(feature = "events")]
	#[tokio::test]
	async fn test_commit_events() {
		let holder = Holder::new("c.json");
		let mut rx = holder.subscribe();

		holder.commit(Snapshot::candidate("c.json", Value::map()));
		holder.commit(Snapshot::candidate("c.json", Value::map()));
		holder.reject(PathBuf::from("c.json"), "nope".to_string());

		assert!(matches!(rx.recv().await, Ok(HoldEvent::Loaded { .. })));
		match rx.recv().await {
			Ok(HoldEvent::Updated { old, new }) => {
				assert_eq!(old.version(), 1);
				assert_eq!(new.version(), 2);
			}
			other => panic!("expected Updated, got {:?}", other),
		}
		assert!(matches!(rx.recv().await, Ok(HoldEvent::Rejected { .. })));
	}
}
