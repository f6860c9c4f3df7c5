/* demos/basic.rs */

use std::fs;
use std::time::Duration;

use liveconf::{LiveConfig, ValidationError};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Prepare a real file
	let config_path = "example_config.yaml";
	fs::write(
		config_path,
		"server:\n  name: live-demo\n  port: 8080\n  hosts: [a.example, b.example]\n",
	)?;
	println!("Created {}", config_path);

	// 1. Create the configuration and register checks before the first load
	let config = LiveConfig::new(config_path);
	config.set_default("server.timeout", 30);
	config.required("server.name")?;
	config.immutable("server.port");
	config.add_validator(|_old, new| {
		let port = new.get_raw("server.port").and_then(|v| v.to_int());
		match port {
			Some(p) if (1..=65535).contains(&p) => Ok(()),
			_ => Err(ValidationError::custom("server.port must be a valid port")),
		}
	});

	// 2. Initial load
	config.load().await?;
	println!(
		"Initial config: {} on port {} (timeout {}s, hosts {:?})",
		config.get("server.name"),
		config.get_int("server.port"),
		config.get_int("server.timeout"),
		config.get_all("server.hosts"),
	);

	// 3. Start watching
	let (cancel_tx, cancel_rx) = watch::channel(false);
	config.watch(cancel_rx).await?;

	println!(
		"Watching for changes on {}... (Edit the file to see updates)",
		config_path
	);
	println!("Waiting 20 seconds...");

	// Loop to display config
	for _ in 0..10 {
		tokio::time::sleep(Duration::from_secs(2)).await;
		println!(
			"Current config: {} on port {} (version {})",
			config.get("server.name"),
			config.get_int("server.port"),
			config.snapshot().version()
		);
	}

	// Cleanup
	let _ = cancel_tx.send(true);
	fs::remove_file(config_path)?;
	println!("Done.");
	Ok(())
}
