/* src/validate/chain.rs */

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{ValidationError, Validator};
use crate::holder::Snapshot;

/// An append-only, ordered list of validators.
///
/// Appends use RCU, so a reload running the chain works on a consistent
/// copy of the list and is never blocked by a concurrent append.
pub struct ValidatorChain {
	validators: ArcSwap<Vec<Arc<dyn Validator>>>,
}

impl ValidatorChain {
	pub fn new() -> Self {
		Self {
			validators: ArcSwap::from_pointee(Vec::new()),
		}
	}

	/// Appends `validator` to the end of the chain.
	pub fn push(&self, validator: Arc<dyn Validator>) {
		self.validators.rcu(|current| {
			let mut next = Vec::with_capacity(current.len() + 1);
			next.extend(current.iter().cloned());
			next.push(Arc::clone(&validator));
			next
		});
	}

	pub fn len(&self) -> usize {
		self.validators.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.validators.load().is_empty()
	}

	/// Runs every validator in append order, stopping at the first failure.
	pub fn run_all(&self, old: &Snapshot, new: &mut Snapshot) -> Result<(), ValidationError> {
		let validators = self.validators.load_full();
		for (position, validator) in validators.iter().enumerate() {
			if let Err(e) = validator.check(old, new) {
				let e = e.at(position);
				log::warn!("Config validation failed: {}", e);
				return Err(e);
			}
		}
		Ok(())
	}
}

impl Default for ValidatorChain {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ValidatorChain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let names: Vec<String> = self
			.validators
			.load()
			.iter()
			.map(|v| v.name().to_string())
			.collect();
		f.debug_struct("ValidatorChain").field("validators", &names).finish()
	}
}
