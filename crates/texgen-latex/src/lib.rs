/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! LaTeX renderable nodes for the spec engine.
//!
//! This crate provides [`Renderable`](texgen_spec::Renderable)
//! implementations for LaTeX tables (`tabular`, booktabs rules, multi-row
//! and multi-column cells) and PGFPlots figures (`tikzpicture`, axes, plot
//! series). Any field typed as [`Content`](texgen_spec::Content) accepts a
//! spec, so documents declare their shape once and bind to data at render
//! time:
//!
//! ```ignore
//! use texgen_latex::tables::{Row, Tabular};
//! use texgen_spec::{evaluate, Content, IterSpec, Scope, Spec};
//!
//! let tabular = Tabular::new("lr")
//!     .header(Row::new().cell("Metric").cell("Value"))
//!     .row(IterSpec::over("metrics").template(
//!         Row::new()
//!             .cell(Spec::reference("name"))
//!             .cell(Spec::reference("value")),
//!     ))
//!     .booktabs();
//!
//! let latex = evaluate(&Content::from(tabular), &data, &Scope::new(), true)?;
//! ```

pub mod color;
pub mod options;
pub mod pgfplots;
pub mod tables;

pub use color::{hex_to_pgf_rgb, is_hex_color, InvalidHexColor};
pub use options::{format_option_value, format_options, indent, wrap_environment};
pub use pgfplots::{
    simple_plot, AddPlot, Axis, AxisKind, Coordinates, Legend, PGFPlot,
};
pub use tables::{
    cmidrule, cmidrules, simple_table, CLine, Cell, HLine, MultiColumn, MultiRow, Row, Table,
    Tabular, Trim,
};
