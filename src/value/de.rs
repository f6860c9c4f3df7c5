/* src/value/de.rs */

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use super::{Map, Value};

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a JSON or YAML value")
	}

	fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
		Ok(Value::Int(v))
	}

	fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
		// Out-of-range unsigned values degrade to floats instead of failing the document.
		Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
	}

	fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
		Ok(Value::Float(v))
	}

	fn visit_str<E>(self, v: &str) -> Result<Value, E> {
		Ok(Value::String(v.to_string()))
	}

	fn visit_string<E>(self, v: String) -> Result<Value, E> {
		Ok(Value::String(v))
	}

	fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E> {
		Ok(Value::Bytes(v.to_vec()))
	}

	fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Value, E> {
		Ok(Value::Bytes(v))
	}

	fn visit_unit<E>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_none<E>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		Value::deserialize(deserializer)
	}

	fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
	where
		A: SeqAccess<'de>,
	{
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element::<Value>()? {
			items.push(item);
		}
		Ok(Value::List(items))
	}

	fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut map = Map::new();
		while let Some((Key(key), value)) = access.next_entry::<Key, Value>()? {
			if key.contains('.') {
				log::warn!("key {:?} contains '.' and cannot be reached by a dotted path", key);
			}
			map.insert(key, value);
		}
		Ok(Value::Map(map))
	}
}

/// A map key normalised to a string.
///
/// YAML permits scalar keys of any type (`1: a`, `true: b`); they are stored
/// under their textual form so dotted paths can address them.
///
/// Float keys (`1.5: a`) keep their dot and are therefore unreachable by
/// path; only [`get_raw`](crate::LiveConfig::get_raw) of the parent map
/// exposes them.
struct Key(String);

impl<'de> Deserialize<'de> for Key {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(KeyVisitor).map(Key)
	}
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
	type Value = String;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a scalar mapping key")
	}

	fn visit_bool<E>(self, v: bool) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_i64<E>(self, v: i64) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_u64<E>(self, v: u64) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_f64<E>(self, v: f64) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_str<E>(self, v: &str) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_string<E>(self, v: String) -> Result<String, E> {
		Ok(v)
	}

	fn visit_bytes<E>(self, v: &[u8]) -> Result<String, E>
	where
		E: de::Error,
	{
		String::from_utf8(v.to_vec()).map_err(|_| E::invalid_value(de::Unexpected::Bytes(v), &self))
	}

	fn visit_unit<E>(self) -> Result<String, E> {
		Ok("null".to_string())
	}

	fn visit_none<E>(self) -> Result<String, E> {
		Ok("null".to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_json_tree() {
		let v: Value = serde_json::from_str(r#"{"a":{"b":15,"c":[1.5,"x",null,true]}}"#).unwrap();
		let a = v.as_map().unwrap()["a"].as_map().unwrap();
		assert_eq!(a["b"], Value::Int(15));
		assert_eq!(
			a["c"],
			Value::List(vec![
				Value::Float(1.5),
				Value::String("x".into()),
				Value::Null,
				Value::Bool(true),
			])
		);
	}

	#[test]
	fn test_yaml_scalar_keys_normalised() {
		let v: Value = serde_yaml::from_str("1: one\ntrue: yes\nnested:\n  2: two\n").unwrap();
		let m = v.as_map().unwrap();
		assert_eq!(m["1"], Value::String("one".into()));
		assert_eq!(m["true"], Value::String("yes".into()));
		assert_eq!(
			m["nested"].as_map().unwrap()["2"],
			Value::String("two".into())
		);
	}

	#[test]
	fn test_float_key_kept_verbatim() {
		let v: Value = serde_yaml::from_str("1.5: a\n").unwrap();
		assert_eq!(v.as_map().unwrap()["1.5"], Value::String("a".into()));
		assert_eq!(crate::value::lookup(&v, "1.5"), None);
	}

	#[test]
	fn test_large_unsigned_becomes_float() {
		let v: Value = serde_json::from_str("18446744073709551615").unwrap();
		assert!(matches!(v, Value::Float(_)));
	}

	#[test]
	fn test_complex_key_rejected() {
		let res = serde_yaml::from_str::<Value>("? [a, b]\n: c\n");
		assert!(res.is_err());
	}
}
