/*
 * path.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Dotted-path resolution against a data context.
//!
//! A path like `"user.addresses.0.city"` traverses nested maps and lists.
//! Segments that parse as non-negative integers index lists; every other
//! segment looks up a map key. Failure is atomic: any missing segment fails
//! the whole call with [`SpecError::PathNotFound`].

use crate::error::{SpecError, SpecResult};
use crate::value::Value;

/// Resolve a dot-separated path against a data context.
pub fn resolve_path<'a>(data: &'a Value, path: &str) -> SpecResult<&'a Value> {
    let mut current = data;
    for segment in path.split('.') {
        current = lookup_segment(current, segment).ok_or_else(|| SpecError::PathNotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

fn lookup_segment<'a>(container: &'a Value, segment: &str) -> Option<&'a Value> {
    match container {
        Value::Map(map) => map.get(segment),
        Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        // Indexing into a scalar is always a miss.
        _ => None,
    }
}
