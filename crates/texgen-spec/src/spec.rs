/*
 * spec.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The spec tree: lazy, immutable expression nodes.
//!
//! A [`Spec`] describes how to obtain a value from a data context at render
//! time: reference a path, compare, iterate, format, branch, call. Spec
//! trees are built once (builder style) and then resolved any number of
//! times against different data contexts; resolution is deterministic and
//! side-effect free.
//!
//! Comparisons are built with explicit methods rather than operator
//! overloading: `Spec::reference("x").gt(5)` builds a comparison node, it
//! does not compare anything.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::content::Content;
use crate::error::{SpecError, SpecResult};
use crate::eval::{evaluate_value, resolve_value};
use crate::format;
use crate::path::resolve_path;
use crate::scope::Scope;
use crate::value::Value;

/// A lazy expression node, resolved against `(data, scope)`.
#[derive(Debug, Clone)]
pub enum Spec {
    /// A reference to a dotted data path, with an optional default for
    /// missing paths.
    Ref {
        path: String,
        default: Option<Value>,
    },

    /// A binary comparison producing a boolean.
    Compare {
        left: Box<Spec>,
        op: CmpOp,
        right: Box<Content>,
    },

    /// Logical AND of two conditions. Both operands are always evaluated.
    And { left: Box<Spec>, right: Box<Spec> },

    /// Logical OR of two conditions. Both operands are always evaluated.
    Or { left: Box<Spec>, right: Box<Spec> },

    /// Iteration over a source collection.
    Iter(IterSpec),

    /// Apply a format specifier to a resolved value.
    Format { value: Box<Content>, fmt: String },

    /// Number formatting with significant digits, fixed decimals, and
    /// thousands separators.
    FormatNumber(NumberFormat),

    /// Conditional selection. Resolves to the chosen branch *unresolved*;
    /// the dispatch engine resolves or renders it one level up, so raw
    /// branches keep their escaping behavior.
    Cond {
        condition: Box<Content>,
        if_true: Box<Content>,
        if_false: Box<Content>,
    },

    /// A literal value needing no resolution.
    Literal(Value),

    /// Raw LaTeX that must never be escaped.
    Raw(String),

    /// Call a function with resolved arguments.
    Call(CallSpec),

    /// Join parts with a separator.
    Join {
        parts: Vec<Content>,
        separator: String,
    },
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        };
        f.write_str(symbol)
    }
}

type CallFn = dyn Fn(&[Value]) -> SpecResult<Value> + Send + Sync;

/// A function call over resolved arguments.
#[derive(Clone)]
pub struct CallSpec {
    func: Arc<CallFn>,
    args: Vec<Content>,
}

impl fmt::Debug for CallSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallSpec(<fn>, {} args)", self.args.len())
    }
}

impl Spec {
    /// Reference a dotted data path: `Spec::reference("user.email")`.
    pub fn reference(path: impl Into<String>) -> Spec {
        Spec::Ref {
            path: path.into(),
            default: None,
        }
    }

    /// Reference a path, falling back to `default` when the path is absent.
    pub fn reference_or(path: impl Into<String>, default: impl Into<Value>) -> Spec {
        Spec::Ref {
            path: path.into(),
            default: Some(default.into()),
        }
    }

    /// A literal value.
    pub fn literal(value: impl Into<Value>) -> Spec {
        Spec::Literal(value.into())
    }

    /// Raw LaTeX that bypasses escaping.
    pub fn raw(latex: impl Into<String>) -> Spec {
        Spec::Raw(latex.into())
    }

    /// Apply a format specifier (e.g. `".2f"`, `".1%"`, `"04d"`).
    pub fn format(value: impl Into<Content>, fmt: impl Into<String>) -> Spec {
        Spec::Format {
            value: Box::new(value.into()),
            fmt: fmt.into(),
        }
    }

    /// Conditional selection between two branches.
    pub fn cond(
        condition: impl Into<Content>,
        if_true: impl Into<Content>,
        if_false: impl Into<Content>,
    ) -> Spec {
        Spec::Cond {
            condition: Box::new(condition.into()),
            if_true: Box::new(if_true.into()),
            if_false: Box::new(if_false.into()),
        }
    }

    /// Conditional with an empty false branch.
    pub fn when(condition: impl Into<Content>, if_true: impl Into<Content>) -> Spec {
        Spec::cond(condition, if_true, "")
    }

    /// Call `func` with resolved arguments.
    pub fn call(
        func: impl Fn(&[Value]) -> SpecResult<Value> + Send + Sync + 'static,
        args: Vec<Content>,
    ) -> Spec {
        Spec::Call(CallSpec {
            func: Arc::new(func),
            args,
        })
    }

    /// Join parts with a separator.
    pub fn join(parts: Vec<Content>, separator: impl Into<String>) -> Spec {
        Spec::Join {
            parts,
            separator: separator.into(),
        }
    }

    fn compare(self, op: CmpOp, right: impl Into<Content>) -> Spec {
        Spec::Compare {
            left: Box::new(self),
            op,
            right: Box::new(right.into()),
        }
    }

    /// Build a `>` comparison node.
    pub fn gt(self, right: impl Into<Content>) -> Spec {
        self.compare(CmpOp::Gt, right)
    }

    /// Build a `<` comparison node.
    pub fn lt(self, right: impl Into<Content>) -> Spec {
        self.compare(CmpOp::Lt, right)
    }

    /// Build a `>=` comparison node.
    pub fn ge(self, right: impl Into<Content>) -> Spec {
        self.compare(CmpOp::Ge, right)
    }

    /// Build a `<=` comparison node.
    pub fn le(self, right: impl Into<Content>) -> Spec {
        self.compare(CmpOp::Le, right)
    }

    /// Build an `==` comparison node.
    pub fn eq_to(self, right: impl Into<Content>) -> Spec {
        self.compare(CmpOp::Eq, right)
    }

    /// Build a `!=` comparison node.
    pub fn ne_to(self, right: impl Into<Content>) -> Spec {
        self.compare(CmpOp::Ne, right)
    }

    /// Combine with another condition; both sides are always evaluated.
    pub fn and(self, right: Spec) -> Spec {
        Spec::And {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Combine with another condition; both sides are always evaluated.
    pub fn or(self, right: Spec) -> Spec {
        Spec::Or {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Resolve this spec against a data context and scope.
    ///
    /// The result is [`Content`]: usually a plain value, but `Cond` returns
    /// its selected branch unresolved and `Iter` returns a sequence whose
    /// elements may themselves be one-layer-resolved content.
    pub fn resolve(&self, data: &Value, scope: &Scope) -> SpecResult<Content> {
        match self {
            Spec::Ref { path, default } => resolve_reference(path, default.as_ref(), data, scope),

            Spec::Compare { left, op, right } => {
                let lhs = spec_value(left, data, scope)?;
                let rhs = evaluate_value(right, data, scope)?;
                Ok(Content::Value(Value::Bool(compare_values(
                    *op, &lhs, &rhs,
                )?)))
            }

            Spec::And { left, right } => {
                let lhs = spec_value(left, data, scope)?.is_truthy();
                let rhs = spec_value(right, data, scope)?.is_truthy();
                Ok(Content::Value(Value::Bool(lhs && rhs)))
            }

            Spec::Or { left, right } => {
                let lhs = spec_value(left, data, scope)?.is_truthy();
                let rhs = spec_value(right, data, scope)?.is_truthy();
                Ok(Content::Value(Value::Bool(lhs || rhs)))
            }

            Spec::Iter(iter) => iter.resolve(data, scope),

            Spec::Format { value, fmt } => {
                let resolved = evaluate_value(value, data, scope)?;
                let formatted = format::apply_format(&resolved, fmt)?;
                if fmt.contains('%') {
                    // The % is pre-escaped here; raw content keeps the
                    // dispatch engine from escaping it a second time.
                    return Ok(Content::from(Spec::raw(formatted.replace('%', "\\%"))));
                }
                Ok(Content::Value(Value::Str(formatted)))
            }

            Spec::FormatNumber(number_format) => number_format
                .resolve(data, scope)
                .map(|s| Content::Value(Value::Str(s))),

            Spec::Cond {
                condition,
                if_true,
                if_false,
            } => {
                let selected = if evaluate_value(condition, data, scope)?.is_truthy() {
                    if_true
                } else {
                    if_false
                };
                Ok(selected.as_ref().clone())
            }

            Spec::Literal(value) => Ok(Content::Value(value.clone())),

            Spec::Raw(latex) => Ok(Content::Value(Value::Str(latex.clone()))),

            Spec::Call(call) => {
                let args: Vec<Value> = call
                    .args
                    .iter()
                    .map(|arg| evaluate_value(arg, data, scope))
                    .collect::<SpecResult<_>>()?;
                (call.func)(&args).map(Content::Value)
            }

            Spec::Join { parts, separator } => {
                let resolved: Vec<String> = parts
                    .iter()
                    .map(|part| Ok(evaluate_value(part, data, scope)?.to_output_string()))
                    .collect::<SpecResult<_>>()?;
                Ok(Content::Value(Value::Str(resolved.join(separator))))
            }
        }
    }
}

/// Resolve a reference: scope first (whole path string as one key), then
/// data path traversal, then the configured default.
fn resolve_reference(
    path: &str,
    default: Option<&Value>,
    data: &Value,
    scope: &Scope,
) -> SpecResult<Content> {
    if let Some(bound) = scope.get(path) {
        return Ok(Content::Value(bound.clone()));
    }
    match resolve_path(data, path) {
        Ok(value) => Ok(Content::Value(value.clone())),
        Err(err @ SpecError::PathNotFound { .. }) => match default {
            Some(value) => Ok(Content::Value(value.clone())),
            None => Err(err),
        },
        Err(err) => Err(err),
    }
}

fn spec_value(spec: &Spec, data: &Value, scope: &Scope) -> SpecResult<Value> {
    let resolved = spec.resolve(data, scope)?;
    evaluate_value(&resolved, data, scope)
}

fn compare_values(op: CmpOp, lhs: &Value, rhs: &Value) -> SpecResult<bool> {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        return Ok(match op {
            CmpOp::Gt => a > b,
            CmpOp::Lt => a < b,
            CmpOp::Ge => a >= b,
            CmpOp::Le => a <= b,
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
        });
    }

    match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => Ok(match op {
            CmpOp::Gt => a > b,
            CmpOp::Lt => a < b,
            CmpOp::Ge => a >= b,
            CmpOp::Le => a <= b,
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
        }),
        (Value::Bool(a), Value::Bool(b)) if matches!(op, CmpOp::Eq | CmpOp::Ne) => Ok(match op {
            CmpOp::Eq => a == b,
            _ => a != b,
        }),
        (Value::Null, Value::Null) if matches!(op, CmpOp::Eq | CmpOp::Ne) => {
            Ok(matches!(op, CmpOp::Eq))
        }
        _ => Err(SpecError::TypeMismatch {
            message: format!(
                "cannot compare {} {op} {}",
                lhs.kind(),
                rhs.kind()
            ),
        }),
    }
}

/// The source of an iteration: a dotted data path or a nested spec.
#[derive(Debug, Clone)]
pub enum IterSource {
    Path(String),
    Spec(Box<Spec>),
}

impl IterSource {
    fn describe(&self) -> String {
        match self {
            IterSource::Path(p) => format!("path '{p}'"),
            IterSource::Spec(s) => format!("spec {s:?}"),
        }
    }
}

impl From<&str> for IterSource {
    fn from(path: &str) -> Self {
        IterSource::Path(path.to_string())
    }
}

impl From<String> for IterSource {
    fn from(path: String) -> Self {
        IterSource::Path(path)
    }
}

impl From<Spec> for IterSource {
    fn from(spec: Spec) -> Self {
        IterSource::Spec(Box::new(spec))
    }
}

/// Iteration over a source collection.
///
/// Three modes, chosen by configuration:
/// - **template**: resolve/render the template once per item, each with a
///   freshly derived scope;
/// - **field extraction** (entered when `x` is configured): build a
///   coordinate tuple per item from the configured extractors, in fixed
///   `x, y, z, marker_size` order;
/// - **passthrough** (neither): the source items, unchanged and in order.
///
/// The source is never mutated or reordered; output order always equals
/// source order, and re-resolving yields identical results.
#[derive(Debug, Clone)]
pub struct IterSpec {
    source: IterSource,
    template: Option<Box<Content>>,
    x: Option<Box<Spec>>,
    y: Option<Box<Spec>>,
    z: Option<Box<Spec>>,
    marker_size: Option<Box<Spec>>,
}

impl IterSpec {
    /// Iterate over a source path or spec.
    pub fn over(source: impl Into<IterSource>) -> IterSpec {
        IterSpec {
            source: source.into(),
            template: None,
            x: None,
            y: None,
            z: None,
            marker_size: None,
        }
    }

    /// Set the per-item template (any content: spec, renderable, value).
    pub fn template(mut self, template: impl Into<Content>) -> IterSpec {
        self.template = Some(Box::new(template.into()));
        self
    }

    /// Extract the x field of each item.
    pub fn x(mut self, spec: Spec) -> IterSpec {
        self.x = Some(Box::new(spec));
        self
    }

    /// Extract the y field of each item.
    pub fn y(mut self, spec: Spec) -> IterSpec {
        self.y = Some(Box::new(spec));
        self
    }

    /// Extract the z field of each item.
    pub fn z(mut self, spec: Spec) -> IterSpec {
        self.z = Some(Box::new(spec));
        self
    }

    /// Extract a per-item marker size.
    pub fn marker_size(mut self, spec: Spec) -> IterSpec {
        self.marker_size = Some(Box::new(spec));
        self
    }

    /// Resolve the iteration to a sequence.
    pub fn resolve(&self, data: &Value, scope: &Scope) -> SpecResult<Content> {
        let items = self.resolve_items(data, scope)?;
        trace!(items = items.len(), source = %self.source.describe(), "resolving iteration");

        if self.template.is_none() && self.x.is_none() {
            // Passthrough: source items unchanged, in order.
            return Ok(Content::Seq(items.into_iter().map(Content::Value).collect()));
        }

        let mut results = Vec::with_capacity(items.len());
        for item in &items {
            let item_scope = match item {
                Value::Map(fields) => scope.child(fields.clone()),
                _ => scope.clone(),
            };

            if let Some(template) = &self.template {
                results.push(resolve_template(template, item, &item_scope)?);
            } else {
                results.push(Content::Value(self.extract_tuple(item, &item_scope)?));
            }
        }

        Ok(Content::Seq(results))
    }

    fn resolve_items(&self, data: &Value, scope: &Scope) -> SpecResult<Vec<Value>> {
        let source_value = match &self.source {
            IterSource::Path(path) => match resolve_path(data, path) {
                Ok(value) => value.clone(),
                Err(err) => {
                    return Err(SpecError::IterationSource {
                        message: format!(
                            "source path '{path}' not found in data ({err}); available keys: {}",
                            available_keys(data)
                        ),
                    });
                }
            },
            IterSource::Spec(spec) => spec_value(spec, data, scope)?,
        };

        match source_value {
            Value::List(items) => Ok(items),
            Value::Null => Err(SpecError::IterationSource {
                message: format!("source {} resolved to null", self.source.describe()),
            }),
            other => Err(SpecError::IterationSource {
                message: format!(
                    "source {} must be a sequence, got {}",
                    self.source.describe(),
                    other.kind()
                ),
            }),
        }
    }

    /// Build a coordinate tuple from the configured extractors, in fixed
    /// field order. A lone `x` extractor yields the bare value.
    fn extract_tuple(&self, item: &Value, item_scope: &Scope) -> SpecResult<Value> {
        let mut tuple = Vec::new();
        for extractor in [&self.x, &self.y, &self.z, &self.marker_size]
            .into_iter()
            .flatten()
        {
            tuple.push(spec_value(extractor, item, item_scope)?);
        }
        if tuple.len() == 1 {
            Ok(tuple.remove(0))
        } else {
            Ok(Value::List(tuple))
        }
    }
}

/// Resolve or render a template one layer against `(item, item_scope)`.
///
/// Renderables are rendered here, per item, and the produced markup is
/// wrapped as raw content so later dispatch does not escape it.
fn resolve_template(template: &Content, item: &Value, item_scope: &Scope) -> SpecResult<Content> {
    match template {
        Content::Node(node) => Ok(Content::from(Spec::raw(node.render(item, item_scope)?))),
        other => resolve_value(other, item, item_scope),
    }
}

fn available_keys(data: &Value) -> String {
    match data {
        Value::Map(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            keys.join(", ")
        }
        other => format!("<{}>", other.kind()),
    }
}

/// Number formatting options (builder style).
///
/// `sig` and `decimals` are mutually exclusive; configuring both fails
/// resolution with a configuration error. `strip_negative_zero` defaults
/// to on.
#[derive(Debug, Clone)]
pub struct NumberFormat {
    value: Box<Content>,
    sig: Option<u32>,
    decimals: Option<u32>,
    thousands_sep: Option<String>,
    strip_negative_zero: bool,
}

impl NumberFormat {
    /// Format the given content as a number.
    pub fn new(value: impl Into<Content>) -> NumberFormat {
        NumberFormat {
            value: Box::new(value.into()),
            sig: None,
            decimals: None,
            thousands_sep: None,
            strip_negative_zero: true,
        }
    }

    /// Round to `digits` significant digits.
    pub fn sig(mut self, digits: u32) -> NumberFormat {
        self.sig = Some(digits);
        self
    }

    /// Use exactly `places` decimal places.
    pub fn decimals(mut self, places: u32) -> NumberFormat {
        self.decimals = Some(places);
        self
    }

    /// Group the integer part with commas.
    pub fn thousands_sep(self) -> NumberFormat {
        self.thousands_sep_with(",")
    }

    /// Group the integer part with a custom separator.
    pub fn thousands_sep_with(mut self, sep: impl Into<String>) -> NumberFormat {
        self.thousands_sep = Some(sep.into());
        self
    }

    /// Preserve the minus sign on formatted negative zeros.
    pub fn keep_negative_zero(mut self) -> NumberFormat {
        self.strip_negative_zero = false;
        self
    }

    fn resolve(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        if self.sig.is_some() && self.decimals.is_some() {
            return Err(SpecError::Configuration {
                message: "cannot set both 'sig' and 'decimals' on a number format".to_string(),
            });
        }

        let resolved = evaluate_value(&self.value, data, scope)?;
        let number = match &resolved {
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Str(s) => match s.trim().parse::<f64>() {
                Ok(n) => n,
                // Non-numeric strings pass through unchanged.
                Err(_) => return Ok(s.clone()),
            },
            other => return Ok(other.to_output_string()),
        };

        let mut formatted = if let Some(sig) = self.sig {
            format::format_sig(number, sig)
        } else if let Some(decimals) = self.decimals {
            format!("{:.*}", decimals as usize, number)
        } else if number.fract() == 0.0 && number.is_finite() && number.abs() < 9.2e18 {
            // Integral floats render without a fractional part.
            (number as i64).to_string()
        } else {
            number.to_string()
        };

        if self.strip_negative_zero {
            formatted = format::strip_negative_zero(formatted);
        }
        if let Some(sep) = &self.thousands_sep {
            formatted = format::add_thousands_separator(&formatted, sep);
        }

        Ok(formatted)
    }
}

impl From<IterSpec> for Spec {
    fn from(iter: IterSpec) -> Self {
        Spec::Iter(iter)
    }
}

impl From<NumberFormat> for Spec {
    fn from(format: NumberFormat) -> Self {
        Spec::FormatNumber(format)
    }
}
