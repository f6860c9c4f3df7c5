/* src/value/path.rs */

//!
//! Dotted-path addressing over a [`Value`] tree.
//!
//! A path such as `"server.listeners.port"` walks mapping nodes one segment
//! at a time. When a segment lands on a list, each element of the list becomes
//! a separate match, so later segments are applied to every element and the
//! final result can hold many values.

use super::{Map, Value};

fn segments(path: &str) -> Option<std::str::Split<'_, char>> {
	if path.is_empty() {
		return None;
	}
	Some(path.split('.'))
}

/// Returns every value matched by `path`, in document order.
///
/// A segment applied to a non-mapping node is a miss, not an error. Lists
/// reached by a segment are flattened into their elements.
pub fn resolve_all<'a>(tree: &'a Value, path: &str) -> Vec<&'a Value> {
	let Some(segments) = segments(path) else {
		return Vec::new();
	};

	let mut current = vec![tree];
	for segment in segments {
		let mut next = Vec::new();
		for node in current {
			if let Some(child) = node.as_map().and_then(|m| m.get(segment)) {
				match child {
					Value::List(items) => next.extend(items.iter()),
					other => next.push(other),
				}
			}
		}
		if next.is_empty() {
			return next;
		}
		current = next;
	}
	current
}

/// Returns the first node at `path` without expanding a trailing list.
///
/// Intermediate lists still fan out, so `"hosts.name"` finds the `name` of
/// the first element of `hosts` that has one; `"hosts"` itself yields the list.
pub fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
	let mut segments: Vec<&str> = segments(path)?.collect();
	let last = segments.pop()?;

	let parents: Vec<&Value> = if segments.is_empty() {
		vec![tree]
	} else {
		resolve_all(tree, &segments.join("."))
	};

	parents
		.into_iter()
		.find_map(|node| node.as_map().and_then(|m| m.get(last)))
}

/// Stores `value` at `path`, creating intermediate mappings as needed.
///
/// Non-mapping nodes met along the way are replaced by empty mappings. An
/// empty path leaves the tree unchanged.
pub fn set_path(tree: &mut Value, path: &str, value: Value) {
	let Some(segments) = segments(path) else {
		return;
	};
	let segments: Vec<&str> = segments.collect();
	let (last, parents) = match segments.split_last() {
		Some(split) => split,
		None => return,
	};

	let mut node = tree;
	for segment in parents {
		node = ensure_map(node)
			.entry((*segment).to_string())
			.or_insert_with(Value::map);
	}
	ensure_map(node).insert((*last).to_string(), value);
}

fn ensure_map(node: &mut Value) -> &mut Map {
	if !node.is_map() {
		*node = Value::map();
	}
	match node {
		Value::Map(m) => m,
		_ => unreachable!("node was just replaced by a map"),
	}
}
