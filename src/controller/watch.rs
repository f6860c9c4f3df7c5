/* src/controller/watch.rs */

//!
//! Background reloading driven by change notifications.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::watch;

use super::{ConfigError, LiveConfig};
use crate::signal::{self, Notifier, SignalError, WatchConfig};

#[cfg(feature = "signal")]
use crate::signal::FsNotifier;

impl LiveConfig {
	/// Starts reloading the file whenever it changes on disk.
	///
	/// Uses the platform file watcher and a one second debounce. The task
	/// stops when `cancel` becomes `true` or its sender is dropped.
	#[cfg(feature = "signal")]
	pub async fn watch(&self, cancel: watch::Receiver<bool>) -> Result<(), ConfigError> {
		self.watch_with(FsNotifier::new(), WatchConfig::default(), cancel)
			.await
	}

	/// Starts reloading the file whenever `notifier` reports a change.
	///
	/// Fails without spawning anything if the path is missing or the
	/// subscription cannot be established. Otherwise returns as soon as the
	/// background task is spawned. Reload failures inside the task are logged
	/// and the previous document stays live; they never stop the watch.
	///
	/// One watch task per configuration is expected; starting another
	/// replaces (and aborts) the previous one.
	pub async fn watch_with<N>(
		&self,
		mut notifier: N,
		config: WatchConfig,
		cancel: watch::Receiver<bool>,
	) -> Result<(), ConfigError>
	where
		N: Notifier,
	{
		let path = self.shared.path.clone();
		if !self.shared.source.exists(&path).await {
			return Err(ConfigError::WatchSetup(SignalError::Config(format!(
				"Path does not exist: {:?}",
				path
			))));
		}
		let events = notifier.subscribe(&path)?;

		// The task must not keep the configuration alive on its own.
		let weak = Arc::downgrade(&self.shared);
		let task_path = path.clone();
		let handle = tokio::spawn(async move {
			signal::debounce(notifier, task_path, events, config, cancel, move || {
				let weak = weak.clone();
				async move {
					let Some(shared) = weak.upgrade() else {
						return ControlFlow::Break(());
					};
					match shared.read().await {
						Ok(snapshot) => log::info!(
							"Read changed config file {:?} (version {})",
							shared.path,
							snapshot.version()
						),
						Err(e) => log::warn!(
							"Error re-reading config file, keeping existing config: {}",
							e
						),
					}
					ControlFlow::Continue(())
				}
			})
			.await;
			log::info!("Stopped watching config");
		});

		log::info!("Started watching config {:?}", path);
		if let Some(previous) = self.shared.lock_watch_state().replace(handle.abort_handle()) {
			previous.abort();
		}
		Ok(())
	}

	/// Stops the background watch task, if any.
	pub fn stop_watching(&self) {
		if let Some(handle) = self.shared.lock_watch_state().take() {
			handle.abort();
		}
	}

	/// Returns true while a watch task is running.
	pub fn is_watching(&self) -> bool {
		self.shared
			.lock_watch_state()
			.as_ref()
			.is_some_and(|handle| !handle.is_finished())
	}
}
