/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lazy spec-resolution engine for data-driven LaTeX generation.
//!
//! This crate provides a small expression language (references,
//! comparisons, iteration, formatting, conditionals) whose nodes
//! ([`Spec`]) are resolved lazily against a data context ([`Value`]) and an
//! optional local [`Scope`]. The dispatch engine ([`evaluate`]) turns any
//! resolved content into an output string with a LaTeX escaping policy.
//!
//! Document-fragment node types (tables, plots) live in `texgen-latex` and
//! plug in through the [`Renderable`] trait: anything implementing
//! `render(data, scope) -> String` may appear as spec content, iteration
//! template, or conditional branch.
//!
//! Spec trees are immutable once built; rendering the same tree against
//! different data contexts from independent threads is safe.
//!
//! # Example
//!
//! ```ignore
//! use texgen_spec::{evaluate, Scope, Spec, Value};
//!
//! let data = Value::from(serde_json::json!({ "price": 1234.567 }));
//! let spec = texgen_spec::NumberFormat::new(Spec::reference("price"))
//!     .decimals(2)
//!     .thousands_sep();
//! let out = evaluate(&spec.into(), &data, &Scope::new(), true)?;
//! assert_eq!(out, "1,234.57");
//! ```

pub mod content;
pub mod error;
pub mod escape;
pub mod eval;
pub mod format;
pub mod path;
pub mod scope;
pub mod spec;
pub mod value;

// Re-export main types at crate root
pub use content::{Content, Renderable};
pub use error::{SpecError, SpecResult};
pub use escape::escape_latex;
pub use eval::{evaluate, evaluate_value, resolve_value};
pub use path::resolve_path;
pub use scope::Scope;
pub use spec::{CmpOp, IterSource, IterSpec, NumberFormat, Spec};
pub use value::Value;
