/* src/loader/mod.rs */

//!
//! Reading raw bytes from a [`Source`] and turning them into a [`Value`](crate::value::Value) tree.

pub mod error;
pub mod format;
pub mod source;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

pub use error::FmtError;
pub use format::{Format, parse_document};
pub use source::MemorySource;

#[cfg(feature = "fs")]
pub use source::FileSource;

/// Abstract filesystem capability that retrieves raw bytes by path.
///
/// Injected into a `LiveConfig` so tests can substitute [`MemorySource`] for
/// the real filesystem.
#[async_trait]
pub trait Source: Send + Sync {
	/// Read raw data as a vector of bytes.
	async fn read(&self, path: &Path) -> Result<Vec<u8>, FmtError>;

	/// Check if the resource exists at the given path.
	async fn exists(&self, path: &Path) -> bool;
}

#[async_trait]
impl<S: Source + ?Sized> Source for Arc<S> {
	async fn read(&self, path: &Path) -> Result<Vec<u8>, FmtError> {
		(**self).read(path).await
	}

	async fn exists(&self, path: &Path) -> bool {
		(**self).exists(path).await
	}
}
