/* src/value/convert.rs */

use super::{Map, Value};

/// A value was found at a path but had the wrong type for the accessor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("value at {path:?}: expected {expected}, got {found}")]
pub struct TypeMismatch {
	pub path: String,
	pub expected: &'static str,
	pub found: &'static str,
}

impl TypeMismatch {
	pub(crate) fn new(path: &str, expected: &'static str, found: &Value) -> Self {
		Self {
			path: path.to_string(),
			expected,
			found: found.kind(),
		}
	}
}

impl Value {
	/// Text form of a text-like value (`String` or UTF-8 decoded `Bytes`).
	pub fn to_text(&self) -> Option<String> {
		match self {
			Value::String(s) => Some(s.clone()),
			Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
			_ => None,
		}
	}

	/// Text form of any scalar value, numbers and booleans included.
	pub fn to_scalar_text(&self) -> Option<String> {
		match self {
			Value::Int(i) => Some(i.to_string()),
			Value::Float(f) => Some(f.to_string()),
			Value::Bool(b) => Some(b.to_string()),
			other => other.to_text(),
		}
	}

	/// Whole number; floats are truncated toward zero.
	pub fn to_int(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			Value::Float(f) => Some(f.trunc() as i64),
			_ => None,
		}
	}

	/// Floating-point number. Integers are not widened.
	pub fn to_float(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn to_map(&self) -> Option<Map> {
		self.as_map().cloned()
	}
}
