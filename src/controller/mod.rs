/* src/controller/mod.rs */

//!
//! The live configuration handle.
//!
//! - [`LiveConfig`] - queryable, validated, live-reloading configuration
//! - [`LiveConfigBuilder`] - construction with an injected [`Source`](crate::loader::Source)

mod error;
mod live;
mod query;
mod watch;

pub use error::ConfigError;
pub use live::{LiveConfig, LiveConfigBuilder};
