/* src/validate/mod.rs */

//!
//! Ordered checks run against every candidate document before it goes live.
//!
//! A [`Validator`] sees the currently live snapshot as `old` and the freshly
//! parsed candidate as `new`. It must not (and cannot) modify `old`; it may
//! modify `new`, for example to inject normalised values. The first failing
//! validator rejects the candidate and the live snapshot stays in place.

mod builtin;
mod chain;

pub use builtin::{Custom, Immutable, Required};
pub use chain::ValidatorChain;

use crate::holder::Snapshot;

/// A check over the (live, candidate) snapshot pair.
pub trait Validator: Send + Sync {
	/// Short name reported when the check fails.
	fn name(&self) -> &str;

	fn check(&self, old: &Snapshot, new: &mut Snapshot) -> Result<(), ValidationError>;
}

/// A validator rejected a candidate document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{check} check failed{}: {reason}", position_suffix(.position))]
pub struct ValidationError {
	/// Name of the failing validator.
	pub check: String,
	/// Path the validator guards, if it guards one.
	pub path: Option<String>,
	/// Index of the validator in the chain; set by the chain.
	pub position: Option<usize>,
	pub reason: String,
}

fn position_suffix(position: &Option<usize>) -> String {
	position.map(|p| format!(" (validator #{p})")).unwrap_or_default()
}

impl ValidationError {
	pub fn new(check: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			check: check.into(),
			path: None,
			position: None,
			reason: reason.into(),
		}
	}

	/// A failure from a user-supplied check.
	pub fn custom(reason: impl Into<String>) -> Self {
		Self::new(builtin::CUSTOM, reason)
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub(crate) fn at(mut self, position: usize) -> Self {
		self.position = Some(position);
		self
	}
}
