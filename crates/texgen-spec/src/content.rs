/*
 * content.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The spec-or-plain-or-renderable content union.
//!
//! Anywhere the engine accepts "content" (a conditional branch, an
//! iteration template, a cell, a caption), the caller may supply a plain
//! value, an unresolved [`Spec`], a [`Renderable`] node, or a sequence of
//! any of these. [`Content`] is that union; the dispatch engine in
//! [`eval`](crate::eval) pattern-matches on it.

use std::fmt;
use std::sync::Arc;

use crate::error::SpecResult;
use crate::scope::Scope;
use crate::spec::{IterSpec, NumberFormat, Spec};
use crate::value::Value;

/// Capability interface for document-fragment nodes.
///
/// Any type implementing `Renderable` may appear as spec content, as an
/// iteration template, or as a conditional branch. Rendering must be pure:
/// the same data and scope always produce the same string.
pub trait Renderable: fmt::Debug + Send + Sync {
    /// Render this node to a LaTeX string.
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String>;
}

/// A value, an unresolved spec, a renderable node, or a sequence of these.
#[derive(Debug, Clone)]
pub enum Content {
    /// A plain value.
    Value(Value),

    /// An unresolved spec.
    Spec(Box<Spec>),

    /// A renderable document-fragment node.
    Node(Arc<dyn Renderable>),

    /// Multi-part content, evaluated element-wise and concatenated.
    Seq(Vec<Content>),
}

impl Content {
    /// Wrap a renderable node as content.
    pub fn node<R: Renderable + 'static>(node: R) -> Content {
        Content::Node(Arc::new(node))
    }

    /// Null content (renders as the empty string).
    pub fn null() -> Content {
        Content::Value(Value::Null)
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Value(value)
    }
}

impl From<Spec> for Content {
    fn from(spec: Spec) -> Self {
        Content::Spec(Box::new(spec))
    }
}

impl From<IterSpec> for Content {
    fn from(iter: IterSpec) -> Self {
        Content::Spec(Box::new(Spec::Iter(iter)))
    }
}

impl From<NumberFormat> for Content {
    fn from(format: NumberFormat) -> Self {
        Content::Spec(Box::new(Spec::FormatNumber(format)))
    }
}

impl From<Vec<Content>> for Content {
    fn from(parts: Vec<Content>) -> Self {
        Content::Seq(parts)
    }
}

impl From<bool> for Content {
    fn from(b: bool) -> Self {
        Content::Value(Value::Bool(b))
    }
}

impl From<i32> for Content {
    fn from(i: i32) -> Self {
        Content::Value(Value::Int(i64::from(i)))
    }
}

impl From<i64> for Content {
    fn from(i: i64) -> Self {
        Content::Value(Value::Int(i))
    }
}

impl From<f64> for Content {
    fn from(f: f64) -> Self {
        Content::Value(Value::Float(f))
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Value(Value::Str(s.to_string()))
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Value(Value::Str(s))
    }
}
