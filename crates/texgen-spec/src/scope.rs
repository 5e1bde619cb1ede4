/*
 * scope.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Locally-bound variable scopes for iteration.
//!
//! A [`Scope`] is an immutable stack of overlay layers. Lookup scans
//! innermost-first, so names bound by an inner iteration shadow both outer
//! bindings and top-level data context lookups. Deriving a child scope
//! never mutates the parent; layers are shared behind `Arc` so child
//! creation at each iteration step stays cheap.

use std::collections::HashMap;
use std::sync::Arc;

use crate::value::Value;

/// An immutable layered name→value overlay.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    layers: Vec<Arc<HashMap<String, Value>>>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no layer binds any name.
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.is_empty())
    }

    /// Look up a name, innermost layer first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layers.iter().rev().find_map(|layer| layer.get(name))
    }

    /// Derive a child scope with `fields` overlaid as the innermost layer.
    pub fn child(&self, fields: HashMap<String, Value>) -> Scope {
        if fields.is_empty() {
            return self.clone();
        }
        let mut layers = self.layers.clone();
        layers.push(Arc::new(fields));
        Scope { layers }
    }

    /// Derive a child scope binding a single name.
    pub fn bind(&self, name: impl Into<String>, value: impl Into<Value>) -> Scope {
        let mut fields = HashMap::new();
        fields.insert(name.into(), value.into());
        self.child(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_scope() {
        let scope = Scope::new();
        assert!(scope.is_empty());
        assert_eq!(scope.get("x"), None);
    }

    #[test]
    fn test_inner_layer_shadows_outer() {
        let outer = Scope::new().bind("x", "outer_x").bind("y", "outer_y");
        let inner = outer.bind("x", "inner_x");

        assert_eq!(inner.get("x"), Some(&Value::from("inner_x")));
        assert_eq!(inner.get("y"), Some(&Value::from("outer_y")));
        // Parent is untouched.
        assert_eq!(outer.get("x"), Some(&Value::from("outer_x")));
    }

    #[test]
    fn test_child_with_empty_fields_is_same_scope() {
        let scope = Scope::new().bind("x", 1);
        let child = scope.child(HashMap::new());
        assert_eq!(child.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_whole_name_is_one_key() {
        // A dotted string is a single scope key, not a path.
        let scope = Scope::new().bind("user.email", "bound");
        assert_eq!(scope.get("user.email"), Some(&Value::from("bound")));
        assert_eq!(scope.get("user"), None);
    }
}
