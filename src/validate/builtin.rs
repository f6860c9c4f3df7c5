/* src/validate/builtin.rs */

use super::{ValidationError, Validator};
use crate::holder::Snapshot;

pub(crate) const CUSTOM: &str = "custom";

/// Rejects a candidate that has no value at `path`.
#[derive(Debug, Clone)]
pub struct Required {
	path: String,
}

impl Required {
	pub const NAME: &'static str = "required";

	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	/// Checks a single snapshot on its own.
	pub(crate) fn check_present(&self, snapshot: &Snapshot) -> Result<(), ValidationError> {
		if snapshot.get_raw(&self.path).is_none() {
			return Err(ValidationError::new(
				Self::NAME,
				format!("{:?} is missing from the configuration", self.path),
			)
			.with_path(self.path.clone()));
		}
		Ok(())
	}
}

impl Validator for Required {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn check(&self, _old: &Snapshot, new: &mut Snapshot) -> Result<(), ValidationError> {
		self.check_present(new)
	}
}

/// Rejects a candidate whose value at `path` differs from the live one.
///
/// The first load is exempt: nothing has been accepted yet to compare against.
#[derive(Debug, Clone)]
pub struct Immutable {
	path: String,
}

impl Immutable {
	pub const NAME: &'static str = "immutable";

	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &str {
		&self.path
	}
}

impl Validator for Immutable {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn check(&self, old: &Snapshot, new: &mut Snapshot) -> Result<(), ValidationError> {
		if !old.loaded() {
			return Ok(());
		}
		let before = old.resolve_all(&self.path);
		let after = new.resolve_all(&self.path);
		let unchanged =
			before.len() == after.len() && before.iter().zip(&after).all(|(a, b)| a.same_as(b));
		if !unchanged {
			return Err(ValidationError::new(
				Self::NAME,
				format!(
					"{:?} is marked as immutable and has changed, rejecting new configuration",
					self.path
				),
			)
			.with_path(self.path.clone()));
		}
		Ok(())
	}
}

/// Wraps an arbitrary check function.
pub struct Custom<F> {
	name: String,
	f: F,
}

impl<F> Custom<F>
where
	F: Fn(&Snapshot, &mut Snapshot) -> Result<(), ValidationError> + Send + Sync,
{
	pub fn new(f: F) -> Self {
		Self::named(CUSTOM, f)
	}

	pub fn named(name: impl Into<String>, f: F) -> Self {
		Self {
			name: name.into(),
			f,
		}
	}
}

impl<F> Validator for Custom<F>
where
	F: Fn(&Snapshot, &mut Snapshot) -> Result<(), ValidationError> + Send + Sync,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn check(&self, old: &Snapshot, new: &mut Snapshot) -> Result<(), ValidationError> {
		(self.f)(old, new)
	}
}

impl<F> std::fmt::Debug for Custom<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Custom").field("name", &self.name).finish_non_exhaustive()
	}
}
