/* src/loader/source/file.rs */

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use super::super::{FmtError, Source};

/// The real file system, backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl FileSource {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Source for FileSource {
	async fn read(&self, path: &Path) -> Result<Vec<u8>, FmtError> {
		match fs::read(path).await {
			Ok(bytes) => Ok(bytes),
			Err(e) if e.kind() == ErrorKind::NotFound => Err(FmtError::NotFound(path.to_path_buf())),
			Err(e) => Err(FmtError::Io(e)),
		}
	}

	async fn exists(&self, path: &Path) -> bool {
		fs::try_exists(path).await.unwrap_or(false)
	}
}
