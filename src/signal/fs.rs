/* src/signal/fs.rs */

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::mpsc;

use super::{ChangeEvent, EventKind, Notifier, Result, SignalError};

const EVENT_CAPACITY: usize = 100;

/// Notifier backed by the platform's native file watcher.
///
/// The parent directory is watched rather than the file itself, so an
/// editor's atomic replace (write temp file, rename over the original) keeps
/// producing events for the new inode.
#[derive(Default)]
pub struct FsNotifier {
	watcher: Option<RecommendedWatcher>,
	dir: Option<PathBuf>,
}

impl FsNotifier {
	pub fn new() -> Self {
		Self::default()
	}
}

fn watch_dir(path: &Path) -> PathBuf {
	match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

fn convert(event: notify::Event, file_name: &OsString) -> Option<ChangeEvent> {
	use notify::EventKind as NK;
	let kind = match event.kind {
		NK::Create(_) => EventKind::Create,
		NK::Modify(_) => EventKind::Modify,
		NK::Remove(_) => EventKind::Remove,
		_ => return None,
	};

	let paths: Vec<PathBuf> = event
		.paths
		.into_iter()
		.filter(|p| p.file_name() == Some(file_name.as_os_str()))
		.collect();
	if paths.is_empty() {
		return None;
	}
	Some(ChangeEvent { paths, kind })
}

impl Notifier for FsNotifier {
	fn subscribe(&mut self, path: &Path) -> Result<mpsc::Receiver<ChangeEvent>> {
		if !path.exists() {
			return Err(SignalError::Config(format!(
				"Path does not exist: {:?}",
				path
			)));
		}
		let file_name = path
			.file_name()
			.map(ToOwned::to_owned)
			.ok_or_else(|| SignalError::Config(format!("Not a file path: {:?}", path)))?;
		let dir = watch_dir(path);

		let (tx, rx) = mpsc::channel(EVENT_CAPACITY);
		let mut watcher =
			notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
				Ok(event) => {
					if let Some(event) = convert(event, &file_name) {
						// A full queue already guarantees a pending reload.
						let _ = tx.try_send(event);
					}
				}
				Err(e) => tracing::error!("Notify error: {:?}", e),
			})?;
		watcher.watch(&dir, RecursiveMode::NonRecursive)?;

		self.watcher = Some(watcher);
		self.dir = Some(dir);
		Ok(rx)
	}

	fn rearm(&mut self, _path: &Path) -> Result<()> {
		let (Some(watcher), Some(dir)) = (self.watcher.as_mut(), self.dir.as_ref()) else {
			return Err(SignalError::Config("not subscribed".to_string()));
		};
		if !dir.exists() {
			// Transiently gone; the next event will try again.
			return Ok(());
		}
		watcher.watch(dir, RecursiveMode::NonRecursive)?;
		Ok(())
	}
}

impl std::fmt::Debug for FsNotifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FsNotifier")
			.field("dir", &self.dir)
			.field("active", &self.watcher.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_watch_dir() {
		assert_eq!(watch_dir(Path::new("app.json")), PathBuf::from("."));
		assert_eq!(watch_dir(Path::new("/etc/app.json")), PathBuf::from("/etc"));
	}

	#[test]
	fn test_convert_filters_other_files() {
		let name = OsString::from("app.json");
		let event = notify::Event::new(notify::EventKind::Modify(notify::event::ModifyKind::Any))
			.add_path(PathBuf::from("/etc/app.json"))
			.add_path(PathBuf::from("/etc/other.json"));
		let converted = convert(event, &name).unwrap();
		assert_eq!(converted.kind, EventKind::Modify);
		assert_eq!(converted.paths, vec![PathBuf::from("/etc/app.json")]);

		let unrelated = notify::Event::new(notify::EventKind::Create(notify::event::CreateKind::File))
			.add_path(PathBuf::from("/etc/other.json"));
		assert!(convert(unrelated, &name).is_none());

		let access = notify::Event::new(notify::EventKind::Access(notify::event::AccessKind::Any))
			.add_path(PathBuf::from("/etc/app.json"));
		assert!(convert(access, &name).is_none());
	}

	#[test]
	fn test_subscribe_missing_path() {
		let mut notifier = FsNotifier::new();
		let res = notifier.subscribe(Path::new("/definitely/not/here.json"));
		assert!(matches!(res, Err(SignalError::Config(_))));
	}

	#[test]
	fn test_rearm_requires_subscription() {
		let mut notifier = FsNotifier::new();
		assert!(notifier.rearm(Path::new("x.json")).is_err());
	}
}
