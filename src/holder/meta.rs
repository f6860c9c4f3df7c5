/* src/holder/meta.rs */

use std::path::PathBuf;
use std::time::Instant;

/// Metadata associated with a snapshot.
#[derive(Debug, Clone)]
pub struct Meta {
	/// Source file path.
	pub source: PathBuf,
	/// Timestamp when the document was parsed.
	pub loaded_at: Instant,
	/// Version number, incremented on each accepted commit. Zero until published.
	pub version: u64,
}

impl Meta {
	pub(crate) fn new(source: PathBuf) -> Self {
		Self {
			source,
			loaded_at: Instant::now(),
			version: 0,
		}
	}
}
