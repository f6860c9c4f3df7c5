/* src/controller/live.rs */

//!
//! Reload engine: read, parse, validate, then commit or reject.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tokio::task::AbortHandle;

use super::ConfigError;
use crate::holder::{Holder, Snapshot};
use crate::loader::{Source, parse_document};
use crate::validate::{Custom, Immutable, Required, ValidationError, Validator, ValidatorChain};
use crate::value::{self, Value};

#[cfg(feature = "fs")]
use crate::loader::FileSource;

/// State shared between every clone of a [`LiveConfig`] and its watch task.
pub(crate) struct Shared {
	pub(crate) path: PathBuf,
	pub(crate) source: Arc<dyn Source>,
	pub(crate) holder: Holder,
	pub(crate) defaults: ArcSwap<Value>,
	pub(crate) validators: ValidatorChain,
	/// Serialises reload cycles. Readers never touch it.
	reload_lock: tokio::sync::Mutex<()>,
	pub(crate) watch_state: Mutex<Option<AbortHandle>>,
}

impl Shared {
	/// Runs one read, parse, validate, commit cycle.
	///
	/// Parsing and validation happen before the swap; on any failure the
	/// live snapshot is left untouched.
	pub(crate) async fn read(&self) -> Result<Arc<Snapshot>, ConfigError> {
		let _writer = self.reload_lock.lock().await;
		let result = self.read_locked().await;
		if let Err(e) = &result {
			self.holder.reject(self.path.clone(), e.to_string());
		}
		result
	}

	async fn read_locked(&self) -> Result<Arc<Snapshot>, ConfigError> {
		let body = self
			.source
			.read(&self.path)
			.await
			.map_err(|source| ConfigError::Read {
				path: self.path.clone(),
				source,
			})?;

		let tree = parse_document(&body).map_err(|source| ConfigError::Parse {
			path: self.path.clone(),
			source,
		})?;

		let mut candidate = Snapshot::candidate(self.path.clone(), tree);
		let previous = self.holder.load();
		self.validators.run_all(&previous, &mut candidate)?;

		Ok(self.holder.commit(candidate))
	}

	pub(crate) fn lock_watch_state(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
		self.watch_state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Drop for Shared {
	fn drop(&mut self) {
		if let Some(handle) = self.lock_watch_state().take() {
			handle.abort();
		}
	}
}

/// A live-reloading configuration document.
///
/// Cloning is cheap; clones share the same live snapshot, defaults,
/// validators and watch task. The watch task is stopped when the last clone
/// is dropped.
#[derive(Clone)]
pub struct LiveConfig {
	pub(crate) shared: Arc<Shared>,
}

/// Builder for LiveConfig.
#[derive(Default)]
pub struct LiveConfigBuilder {
	path: Option<PathBuf>,
	source: Option<Arc<dyn Source>>,
}

impl LiveConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Filesystem used to read the document. Defaults to [`FileSource`] when
	/// the `fs` feature is enabled.
	pub fn source(mut self, source: impl Source + 'static) -> Self {
		self.source = Some(Arc::new(source));
		self
	}

	pub fn build(self) -> Result<LiveConfig, ConfigError> {
		let path = self
			.path
			.ok_or_else(|| ConfigError::Builder("path is required".to_string()))?;

		#[cfg(feature = "fs")]
		let source = self
			.source
			.unwrap_or_else(|| Arc::new(FileSource::new()) as Arc<dyn Source>);
		#[cfg(not(feature = "fs"))]
		let source = self
			.source
			.ok_or_else(|| ConfigError::Builder("source is required".to_string()))?;

		Ok(LiveConfig::from_parts(path, source))
	}
}

impl LiveConfig {
	pub fn builder() -> LiveConfigBuilder {
		LiveConfigBuilder::new()
	}

	/// Creates an empty, unloaded configuration for the file at `path`.
	///
	/// No I/O happens until [`load`](Self::load).
	#[cfg(feature = "fs")]
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self::from_parts(path.into(), Arc::new(FileSource::new()))
	}

	/// Like [`new`](Self::new), reading through `source` instead of the real filesystem.
	pub fn with_source(path: impl Into<PathBuf>, source: impl Source + 'static) -> Self {
		Self::from_parts(path.into(), Arc::new(source))
	}

	fn from_parts(path: PathBuf, source: Arc<dyn Source>) -> Self {
		Self {
			shared: Arc::new(Shared {
				holder: Holder::new(path.clone()),
				path,
				source,
				defaults: ArcSwap::from_pointee(Value::map()),
				validators: ValidatorChain::new(),
				reload_lock: tokio::sync::Mutex::new(()),
				watch_state: Mutex::new(None),
			}),
		}
	}

	/// Creates a configuration for `path` and performs the initial load.
	#[cfg(feature = "fs")]
	pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
		let config = Self::new(path);
		config.load().await?;
		Ok(config)
	}

	/// Performs the initial load.
	///
	/// Any error means the configuration holds no accepted document and
	/// should not be used.
	pub async fn load(&self) -> Result<(), ConfigError> {
		match self.shared.read().await {
			Ok(snapshot) => {
				log::info!(
					"Loaded config {:?} (version {})",
					self.shared.path,
					snapshot.version()
				);
				Ok(())
			}
			Err(e) => {
				log::error!("Unable to read initial config: {}", e);
				Err(e)
			}
		}
	}

	/// Re-reads the file now, returning the newly accepted snapshot.
	///
	/// On failure the previous snapshot stays live.
	pub async fn reload(&self) -> Result<Arc<Snapshot>, ConfigError> {
		self.shared.read().await
	}

	/// Path of the watched document.
	pub fn path(&self) -> &Path {
		&self.shared.path
	}

	/// Whether a document has been accepted yet.
	pub fn is_loaded(&self) -> bool {
		self.shared.holder.load().loaded()
	}

	/// Appends a check function to the validator chain.
	///
	/// The function receives the live snapshot and the candidate. It may
	/// modify the candidate; returning an error rejects it.
	pub fn add_validator<F>(&self, f: F)
	where
		F: Fn(&Snapshot, &mut Snapshot) -> Result<(), ValidationError> + Send + Sync + 'static,
	{
		self.add(Custom::new(f));
	}

	/// Appends any [`Validator`] to the chain.
	pub fn add(&self, validator: impl Validator + 'static) {
		self.shared.validators.push(Arc::new(validator));
	}

	/// Marks `path` as required: documents without it are rejected.
	///
	/// If a document is already live and lacks `path`, returns the failure
	/// immediately and registers nothing.
	pub fn required(&self, path: impl Into<String>) -> Result<(), ConfigError> {
		let validator = Required::new(path);
		let live = self.shared.holder.load();
		if live.loaded() {
			validator.check_present(&live)?;
		}
		self.add(validator);
		Ok(())
	}

	/// Marks `path` as immutable: once a document is live, reloads that
	/// change the value at `path` are rejected.
	pub fn immutable(&self, path: impl Into<String>) {
		self.add(Immutable::new(path));
	}

	/// Sets the value returned for `path` when the document lacks it.
	pub fn set_default(&self, path: &str, value: impl Into<Value>) {
		let value = value.into();
		self.shared.defaults.rcu(|current| {
			let mut next = (**current).clone();
			value::set_path(&mut next, path, value.clone());
			next
		});
	}

	/// Subscribes to reload events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<crate::holder::HoldEvent> {
		self.shared.holder.subscribe()
	}
}

impl std::fmt::Debug for LiveConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("LiveConfig");
		s.field("path", &self.shared.path);
		s.field("holder", &self.shared.holder);
		s.field("validators", &self.shared.validators);
		s.field("watching", &self.is_watching());
		s.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::loader::MemorySource;

	const PATH: &str = "test.config";

	fn config_with(doc: &str) -> (LiveConfig, Arc<MemorySource>) {
		let source = Arc::new(MemorySource::new());
		source.insert(PATH, doc);
		let config = LiveConfig::with_source(PATH, Arc::clone(&source));
		(config, source)
	}

	#[tokio::test]
	async fn test_load_json() {
		let (config, _) = config_with(r#"{"a":{"b":15}}"#);
		assert!(!config.is_loaded());
		config.load().await.unwrap();
		assert!(config.is_loaded());
		assert_eq!(config.get_int("a.b"), 15);
	}

	#[tokio::test]
	async fn test_missing_file_is_read_error() {
		let config = LiveConfig::with_source(PATH, MemorySource::new());
		let err = config.load().await.unwrap_err();
		assert!(matches!(err, ConfigError::Read { .. }));
		assert!(!config.is_loaded());
	}

	#[tokio::test]
	async fn test_invalid_document_is_parse_error() {
		let (config, _) = config_with("blahblah");
		let err = config.load().await.unwrap_err();
		assert!(matches!(err, ConfigError::Parse { .. }));
	}

	#[tokio::test]
	async fn test_rejected_reload_keeps_previous() {
		let (config, source) = config_with(r#"{"v":1}"#);
		config.load().await.unwrap();

		source.insert(PATH, "{ broken");
		assert!(config.reload().await.is_err());
		assert_eq!(config.get_int("v"), 1);
		assert_eq!(config.snapshot().version(), 1);

		source.insert(PATH, r#"{"v":2}"#);
		let live = config.reload().await.unwrap();
		assert_eq!(live.version(), 2);
		assert_eq!(config.get_int("v"), 2);
	}

	#[tokio::test]
	async fn test_required_checks_live_document() {
		let (config, _) = config_with(r#"{"hash1":{"intval1":15}}"#);
		config.load().await.unwrap();

		assert!(config.required("hash1.intval1").is_ok());
		let err = config.required("hash1.intval2").unwrap_err();
		assert_eq!(
			err.validation().and_then(|v| v.path.as_deref()),
			Some("hash1.intval2")
		);
		// Only the passing one was registered.
		assert_eq!(config.shared.validators.len(), 1);
	}

	#[tokio::test]
	async fn test_validator_may_modify_candidate() {
		let (config, _) = config_with(r#"{"name":"  padded  "}"#);
		config.add_validator(|_old, new| {
			let trimmed = new.get_raw("name").and_then(Value::to_text);
			if let Some(name) = trimmed {
				new.set("name", name.trim());
			}
			Ok(())
		});
		config.load().await.unwrap();
		assert_eq!(config.get("name"), "padded");
	}

	#[tokio::test]
	async fn test_builder() {
		let err = LiveConfig::builder().build().unwrap_err();
		assert!(matches!(err, ConfigError::Builder(_)));

		let source = MemorySource::new();
		source.insert(PATH, "a: 1\n");
		let config = LiveConfig::builder().path(PATH).source(source).build().unwrap();
		config.load().await.unwrap();
		assert_eq!(config.get_int("a"), 1);
		assert_eq!(config.path(), Path::new(PATH));
	}
}
