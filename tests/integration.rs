/* tests/integration.rs */

#![cfg(feature = "full")]

use std::time::Duration;

use liveconf::LiveConfig;
use tokio::sync::watch;

#[tokio::test]
async fn test_live_reload() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("app.yaml");
	tokio::fs::write(&path, b"server:\n  port: 8080\n  name: first\n").await?;

	let config = LiveConfig::open(&path).await?;
	config.immutable("server.port");
	assert_eq!(config.get_int("server.port"), 8080);

	let (_cancel_tx, cancel_rx) = watch::channel(false);
	config.watch(cancel_rx).await?;

	// Accepted change.
	tokio::fs::write(&path, b"server:\n  port: 8080\n  name: second\n").await?;
	for _ in 0..50 {
		// 5 seconds max
		tokio::time::sleep(Duration::from_millis(100)).await;
		if config.get("server.name") == "second" {
			break;
		}
	}
	assert_eq!(config.get("server.name"), "second");

	// Rejected change: port is immutable.
	tokio::fs::write(&path, b"server:\n  port: 9090\n  name: third\n").await?;
	tokio::time::sleep(Duration::from_millis(2500)).await;
	assert_eq!(config.get_int("server.port"), 8080);
	assert_eq!(config.get("server.name"), "second");
	assert!(config.is_watching());

	Ok(())
}

#[tokio::test]
async fn test_watch_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let config = LiveConfig::new(dir.path().join("missing.json"));
	let (_cancel_tx, cancel_rx) = watch::channel(false);
	assert!(config.watch(cancel_rx).await.is_err());
}
