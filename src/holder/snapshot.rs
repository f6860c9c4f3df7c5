/* src/holder/snapshot.rs */

use std::path::{Path, PathBuf};

use super::Meta;
use crate::value::{self, Value};

/// One fully parsed configuration document.
///
/// A published snapshot is never mutated; every accepted reload publishes a
/// new one. Validators receive the candidate mutably before publication and
/// may inject normalised values with [`Snapshot::set`].
#[derive(Debug, Clone)]
pub struct Snapshot {
	tree: Value,
	loaded: bool,
	meta: Meta,
}

impl Snapshot {
	/// The empty, never-loaded snapshot a configuration starts with.
	pub fn empty(source: impl Into<PathBuf>) -> Self {
		Self {
			tree: Value::map(),
			loaded: false,
			meta: Meta::new(source.into()),
		}
	}

	/// A freshly parsed candidate awaiting validation.
	pub fn candidate(source: impl Into<PathBuf>, tree: Value) -> Self {
		Self {
			tree,
			loaded: false,
			meta: Meta::new(source.into()),
		}
	}

	pub fn tree(&self) -> &Value {
		&self.tree
	}

	/// Whether this snapshot was ever accepted as live.
	pub fn loaded(&self) -> bool {
		self.loaded
	}

	pub fn meta(&self) -> &Meta {
		&self.meta
	}

	pub fn filename(&self) -> &Path {
		&self.meta.source
	}

	pub fn version(&self) -> u64 {
		self.meta.version
	}

	/// First node at `path`, trailing lists unexpanded. Defaults are not consulted.
	pub fn get_raw(&self, path: &str) -> Option<&Value> {
		value::lookup(&self.tree, path)
	}

	/// Every value matched by `path`. Defaults are not consulted.
	pub fn resolve_all(&self, path: &str) -> Vec<&Value> {
		value::resolve_all(&self.tree, path)
	}

	/// Stores `value` at `path` in this snapshot's tree.
	pub fn set(&mut self, path: &str, value: impl Into<Value>) {
		value::set_path(&mut self.tree, path, value.into());
	}

	pub(crate) fn publish(mut self, version: u64) -> Self {
		self.loaded = true;
		self.meta.version = version;
		self
	}
}
