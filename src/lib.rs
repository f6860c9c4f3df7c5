/* src/lib.rs */

//!
//! Live-reloading configuration documents with dotted-path queries and a
//! validation gate.
//!
//! A [`LiveConfig`] wraps one JSON or YAML file. Readers query it by dotted
//! path (`config.get_int("server.port")`) from any thread at any time. When
//! the file changes, the new document is parsed and run through an ordered
//! chain of validators; only if all of them pass does it replace the live
//! document. Otherwise the previous document stays in place.
//!
//! This crate is organised in layers:
//!
//! - **value**: The parsed document tree and dotted-path resolution.
//! - **loader**: Filesystem capability and JSON-then-YAML parsing.
//! - **holder**: Atomic storage of the live snapshot.
//! - **validate**: The validator chain and built-in `Required`/`Immutable` checks.
//! - **signal**: Change notification and debouncing.
//! - **controller**: Unified interface integrating the above ([`LiveConfig`]).
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features (default).
//! - `fs`: Real-filesystem [`loader::FileSource`] and `LiveConfig::new`/`open`.
//! - `signal`: `notify`-backed [`signal::FsNotifier`] and `LiveConfig::watch`.
//! - `events`: Broadcast of reload outcomes via `LiveConfig::subscribe`.
//!
//! ## Basic Usage
//!
//! See `demos/basic.rs` for a complete example.

pub mod controller;
pub mod holder;
pub mod loader;
pub mod signal;
pub mod validate;
pub mod value;

pub use controller::{ConfigError, LiveConfig, LiveConfigBuilder};
pub use holder::Snapshot;
pub use validate::{ValidationError, Validator};
pub use value::{Map, Value};
