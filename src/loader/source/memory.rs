/* src/loader/source/memory.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::super::{FmtError, Source};

/// A simple in-memory source useful for testing and embedded environments.
///
/// Writes go through `&self`, so a source shared with a `LiveConfig` (via
/// `Arc`) can still be rewritten to simulate edits.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces the contents at `path`.
	pub fn insert(&self, path: impl Into<PathBuf>, value: impl Into<Vec<u8>>) {
		self.data
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(path.into(), value.into());
	}

	/// Removes the contents at `path`, returning them if present.
	pub fn remove(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
		self.data
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(path.as_ref())
	}
}

#[async_trait]
impl Source for MemorySource {
	async fn read(&self, path: &Path) -> Result<Vec<u8>, FmtError> {
		self.data
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(path)
			.cloned()
			.ok_or_else(|| FmtError::NotFound(path.to_path_buf()))
	}

	async fn exists(&self, path: &Path) -> bool {
		self.data
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.contains_key(path)
	}
}
