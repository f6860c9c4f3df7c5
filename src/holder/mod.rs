/* src/holder/mod.rs */

//!
//! Atomic storage of the live configuration snapshot.

mod event;
mod meta;
mod snapshot;
mod store;

pub use event::HoldEvent;
pub use meta::Meta;
pub use snapshot::Snapshot;
pub use store::{DEFAULT_EVENT_CAPACITY, Holder};
