/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The data context value model.
//!
//! A [`Value`] is the nested mapping/sequence structure a spec tree is
//! resolved against: string-keyed maps, ordered lists, and scalars. A data
//! context is supplied fresh for each render call and is never mutated by
//! the engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A value in the data context (or produced by spec resolution).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A null/missing value.
    Null,

    /// A boolean value.
    Bool(bool),

    /// An integer value.
    Int(i64),

    /// A floating-point value.
    Float(f64),

    /// A string value.
    Str(String),

    /// An ordered list of values.
    List(Vec<Value>),

    /// A map of string keys to values.
    Map(HashMap<String, Value>),
}

impl Value {
    /// Check if this value is "truthy" for conditional evaluation.
    ///
    /// Truthiness rules:
    /// - `false`, `0`, `0.0`, the empty string, the empty list, the empty
    ///   map, and null are falsy
    /// - everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(m) => !m.is_empty(),
        }
    }

    /// A short name for this value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// The numeric view of this value, when it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert this value to its output string form.
    ///
    /// - Null renders as the empty string
    /// - booleans render as `true`/`false`
    /// - lists render as the concatenation of their elements
    /// - maps render as `true`
    pub fn to_output_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
            Value::List(items) => items.iter().map(|v| v.to_output_string()).collect(),
            Value::Map(_) => "true".to_string(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(m: HashMap<String, Value>) -> Self {
        Value::Map(m)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                Value::Map(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Null.is_truthy());

        assert!(Value::Int(1).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Float(0.5).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());

        assert!(Value::from("false").is_truthy()); // non-empty string is truthy
        assert!(!Value::from("").is_truthy());

        assert!(Value::List(vec![Value::Bool(false)]).is_truthy());
        assert!(!Value::List(vec![]).is_truthy());

        let mut map = HashMap::new();
        map.insert("key".to_string(), Value::Null);
        assert!(Value::Map(map).is_truthy());
        assert!(!Value::Map(HashMap::new()).is_truthy());
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({
            "name": "Alice",
            "age": 42,
            "ratio": 0.5,
            "tags": ["a", "b"],
        }));

        let Value::Map(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map["name"], Value::from("Alice"));
        assert_eq!(map["age"], Value::Int(42));
        assert_eq!(map["ratio"], Value::Float(0.5));
        assert_eq!(
            map["tags"],
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_output_string() {
        assert_eq!(Value::Null.to_output_string(), "");
        assert_eq!(Value::Bool(true).to_output_string(), "true");
        assert_eq!(Value::Int(-3).to_output_string(), "-3");
        assert_eq!(Value::Float(2.5).to_output_string(), "2.5");
        assert_eq!(Value::from("hi").to_output_string(), "hi");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::Int(1)]).to_output_string(),
            "a1"
        );
    }
}
