/* src/value/mod.rs */

//!
//! The parsed document tree and the helpers that address it by dotted path.

mod convert;
mod de;
pub mod path;

use std::collections::BTreeMap;

pub use convert::TypeMismatch;
pub use path::{lookup, resolve_all, set_path};

/// A string-keyed mapping node.
pub type Map = BTreeMap<String, Value>;

/// One node of a parsed configuration document.
///
/// Map keys are always strings: YAML scalar keys are normalised while the
/// tree is built, so lookups never need to care which format produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	/// Raw bytes; read back as (lossy) UTF-8 text.
	Bytes(Vec<u8>),
	List(Vec<Value>),
	Map(Map),
}

impl Value {
	/// Creates an empty mapping node.
	pub fn map() -> Self {
		Value::Map(Map::new())
	}

	/// Short type name used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::Bytes(_) => "bytes",
			Value::List(_) => "list",
			Value::Map(_) => "map",
		}
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Value::Map(m) => Some(m),
			_ => None,
		}
	}

	pub fn is_map(&self) -> bool {
		matches!(self, Value::Map(_))
	}

	/// Structural equality where two NaN floats compare equal.
	pub fn same_as(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
			(Value::List(a), Value::List(b)) => {
				a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
			}
			(Value::Map(a), Value::Map(b)) => {
				a.len() == b.len()
					&& a
						.iter()
						.zip(b)
						.all(|((ka, va), (kb, vb))| ka == kb && va.same_as(vb))
			}
			_ => self == other,
		}
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(i64::from(v))
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Int(i64::from(v))
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(v)
	}
}

impl From<Map> for Value {
	fn from(v: Map) -> Self {
		Value::Map(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::List(v)
	}
}

impl From<Vec<&str>> for Value {
	fn from(v: Vec<&str>) -> Self {
		Value::List(v.into_iter().map(Value::from).collect())
	}
}

impl From<Vec<String>> for Value {
	fn from(v: Vec<String>) -> Self {
		Value::List(v.into_iter().map(Value::from).collect())
	}
}
