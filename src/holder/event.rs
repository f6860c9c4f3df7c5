/* src/holder/event.rs */

use std::path::PathBuf;
use std::sync::Arc;

use super::Snapshot;

/// Events emitted by the holder on reload outcomes.
#[derive(Debug, Clone)]
pub enum HoldEvent {
	/// The first document was accepted.
	Loaded { snapshot: Arc<Snapshot> },
	/// A later document replaced the live one.
	Updated {
		old: Arc<Snapshot>,
		new: Arc<Snapshot>,
	},
	/// A candidate was refused; the live snapshot is unchanged.
	Rejected { source: PathBuf, reason: String },
}
