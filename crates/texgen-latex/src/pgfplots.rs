/*
 * pgfplots.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! PGFPlots renderable nodes.
//!
//! A [`PGFPlot`] wraps an [`Axis`], which holds [`AddPlot`] series. Plot
//! coordinates are [`Content`], so they can come from static pairs or from
//! an iteration over data:
//!
//! ```ignore
//! let plot = PGFPlot::new(
//!     Axis::new()
//!         .xlabel("Time (s)")
//!         .ylabel("Temperature (K)")
//!         .plot(AddPlot::new().color("blue").mark("*").coords(
//!             Coordinates::new(
//!                 IterSpec::over("points")
//!                     .x(Spec::reference("t"))
//!                     .y(Spec::reference("temp")),
//!             ),
//!         )),
//! );
//! ```

use crate::options::format_options;
use texgen_spec::{evaluate, evaluate_value, Content, Renderable, Scope, SpecResult, Value};
use tracing::trace;

/// Coordinate list for a plot.
///
/// The source resolves to a sequence of points; each point is either a
/// tuple (a list value) or a bare value.
#[derive(Debug, Clone)]
pub struct Coordinates {
    source: Content,
}

impl Coordinates {
    pub fn new(source: impl Into<Content>) -> Coordinates {
        Coordinates {
            source: source.into(),
        }
    }

    /// Static 2D coordinates.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Coordinates {
        let points = pairs
            .iter()
            .map(|&(x, y)| Value::List(vec![Value::Float(x), Value::Float(y)]))
            .collect();
        Coordinates::new(Value::List(points))
    }

    /// Static 3D coordinates.
    pub fn from_triples(triples: &[(f64, f64, f64)]) -> Coordinates {
        let points = triples
            .iter()
            .map(|&(x, y, z)| {
                Value::List(vec![Value::Float(x), Value::Float(y), Value::Float(z)])
            })
            .collect();
        Coordinates::new(Value::List(points))
    }
}

impl Renderable for Coordinates {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let points = match evaluate_value(&self.source, data, scope)? {
            Value::List(points) => points,
            other => vec![other],
        };

        let coord_strs: Vec<String> = points
            .iter()
            .map(|point| match point {
                Value::List(parts) => {
                    let joined = parts
                        .iter()
                        .map(Value::to_output_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("({joined})")
                }
                other => format!("({})", other.to_output_string()),
            })
            .collect();

        Ok(format!("coordinates {{{}}}", coord_strs.join(" ")))
    }
}

/// An `\addplot` command, coordinate- or expression-based.
#[derive(Debug, Clone, Default)]
pub struct AddPlot {
    coords: Option<Coordinates>,
    expression: Option<String>,
    domain: Option<String>,
    samples: Option<i64>,
    color: Option<String>,
    mark: Option<String>,
    style: Option<String>,
    line_width: Option<String>,
    only_marks: bool,
    no_marks: bool,
    smooth: bool,
    thick: bool,
    surf: bool,
    mesh: bool,
    raw_options: Option<String>,
}

impl AddPlot {
    pub fn new() -> AddPlot {
        AddPlot::default()
    }

    pub fn coords(mut self, coords: Coordinates) -> AddPlot {
        self.coords = Some(coords);
        self
    }

    /// Plot an expression, e.g. `x^2`.
    pub fn expression(mut self, expression: impl Into<String>) -> AddPlot {
        self.expression = Some(expression.into());
        self
    }

    /// Expression domain, e.g. `0:10`.
    pub fn domain(mut self, domain: impl Into<String>) -> AddPlot {
        self.domain = Some(domain.into());
        self
    }

    pub fn samples(mut self, samples: i64) -> AddPlot {
        self.samples = Some(samples);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> AddPlot {
        self.color = Some(color.into());
        self
    }

    pub fn mark(mut self, mark: impl Into<String>) -> AddPlot {
        self.mark = Some(mark.into());
        self
    }

    /// A named style flag, e.g. `dashed`.
    pub fn style(mut self, style: impl Into<String>) -> AddPlot {
        self.style = Some(style.into());
        self
    }

    pub fn line_width(mut self, line_width: impl Into<String>) -> AddPlot {
        self.line_width = Some(line_width.into());
        self
    }

    pub fn only_marks(mut self) -> AddPlot {
        self.only_marks = true;
        self
    }

    /// Suppress markers; overrides any `mark` setting.
    pub fn no_marks(mut self) -> AddPlot {
        self.no_marks = true;
        self
    }

    pub fn smooth(mut self) -> AddPlot {
        self.smooth = true;
        self
    }

    pub fn thick(mut self) -> AddPlot {
        self.thick = true;
        self
    }

    /// Render as a 3D surface (`\addplot3`).
    pub fn surf(mut self) -> AddPlot {
        self.surf = true;
        self
    }

    /// Render as a 3D mesh (`\addplot3`).
    pub fn mesh(mut self) -> AddPlot {
        self.mesh = true;
        self
    }

    /// Append verbatim options.
    pub fn raw_options(mut self, options: impl Into<String>) -> AddPlot {
        self.raw_options = Some(options.into());
        self
    }
}

impl Renderable for AddPlot {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let mut options: Vec<(&str, Value)> = Vec::new();
        if let Some(color) = &self.color {
            options.push(("color", color.as_str().into()));
        }
        if self.no_marks {
            options.push(("mark", "none".into()));
        } else if let Some(mark) = &self.mark {
            options.push(("mark", mark.as_str().into()));
        }
        if let Some(style) = &self.style {
            options.push((style.as_str(), true.into()));
        }
        if let Some(line_width) = &self.line_width {
            options.push(("line_width", line_width.as_str().into()));
        }
        if self.only_marks {
            options.push(("only_marks", true.into()));
        }
        if self.smooth {
            options.push(("smooth", true.into()));
        }
        if self.thick {
            options.push(("thick", true.into()));
        }
        if let Some(domain) = &self.domain {
            options.push(("domain", domain.as_str().into()));
        }
        if let Some(samples) = self.samples {
            options.push(("samples", samples.into()));
        }
        if self.surf {
            options.push(("surf", true.into()));
        }
        if self.mesh {
            options.push(("mesh", true.into()));
        }

        let command = if self.surf || self.mesh {
            "\\addplot3"
        } else {
            "\\addplot"
        };

        let opts = format_options(&options, self.raw_options.as_deref());
        let mut parts = if opts.is_empty() {
            vec![command.to_string()]
        } else {
            vec![format!("{command}[{opts}]")]
        };

        if let Some(coords) = &self.coords {
            parts.push(coords.render(data, scope)?);
        } else if let Some(expression) = &self.expression {
            parts.push(format!("{{{expression}}}"));
        }

        Ok(format!("{};", parts.join(" ")))
    }
}

/// Legend entries, evaluated and joined into a `\legend` command.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    entries: Vec<Content>,
}

impl Legend {
    pub fn new() -> Legend {
        Legend::default()
    }

    pub fn entry(mut self, entry: impl Into<Content>) -> Legend {
        self.entries.push(entry.into());
        self
    }
}

impl Renderable for Legend {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let resolved: Vec<String> = self
            .entries
            .iter()
            .map(|entry| evaluate(entry, data, scope, false))
            .collect::<SpecResult<_>>()?;
        Ok(format!("\\legend{{{}}}", resolved.join(", ")))
    }
}

/// The axis environment flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisKind {
    #[default]
    Linear,
    SemiLogX,
    SemiLogY,
    LogLog,
}

impl AxisKind {
    fn environment(self) -> &'static str {
        match self {
            AxisKind::Linear => "axis",
            AxisKind::SemiLogX => "semilogxaxis",
            AxisKind::SemiLogY => "semilogyaxis",
            AxisKind::LogLog => "loglogaxis",
        }
    }
}

/// A PGFPlots axis environment.
///
/// Labels and the title are [`Content`], so they may be specs resolved
/// against the render data.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    kind: AxisKind,
    plots: Vec<AddPlot>,
    xlabel: Option<Content>,
    ylabel: Option<Content>,
    zlabel: Option<Content>,
    title: Option<Content>,
    xmin: Option<f64>,
    xmax: Option<f64>,
    ymin: Option<f64>,
    ymax: Option<f64>,
    zmin: Option<f64>,
    zmax: Option<f64>,
    legend: Option<Legend>,
    legend_pos: Option<String>,
    legend_style: Option<String>,
    grid: Option<String>,
    width: Option<String>,
    height: Option<String>,
    enlargelimits: Option<Value>,
    clip: Option<bool>,
    axis_lines: Option<String>,
    raw_options: Option<String>,
}

impl Axis {
    pub fn new() -> Axis {
        Axis::default()
    }

    pub fn kind(mut self, kind: AxisKind) -> Axis {
        self.kind = kind;
        self
    }

    pub fn plot(mut self, plot: AddPlot) -> Axis {
        self.plots.push(plot);
        self
    }

    pub fn xlabel(mut self, label: impl Into<Content>) -> Axis {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<Content>) -> Axis {
        self.ylabel = Some(label.into());
        self
    }

    pub fn zlabel(mut self, label: impl Into<Content>) -> Axis {
        self.zlabel = Some(label.into());
        self
    }

    pub fn title(mut self, title: impl Into<Content>) -> Axis {
        self.title = Some(title.into());
        self
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Axis {
        self.xmin = Some(min);
        self.xmax = Some(max);
        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Axis {
        self.ymin = Some(min);
        self.ymax = Some(max);
        self
    }

    pub fn zlim(mut self, min: f64, max: f64) -> Axis {
        self.zmin = Some(min);
        self.zmax = Some(max);
        self
    }

    pub fn legend(mut self, legend: Legend) -> Axis {
        self.legend = Some(legend);
        self
    }

    /// Legend from plain string entries.
    pub fn legend_entries(self, entries: &[&str]) -> Axis {
        let legend = entries
            .iter()
            .fold(Legend::new(), |legend, &entry| legend.entry(entry));
        self.legend(legend)
    }

    /// Legend position, e.g. `north west`.
    pub fn legend_pos(mut self, pos: impl Into<String>) -> Axis {
        self.legend_pos = Some(pos.into());
        self
    }

    pub fn legend_style(mut self, style: impl Into<String>) -> Axis {
        self.legend_style = Some(style.into());
        self
    }

    /// Grid setting: `major`, `minor`, or `both`.
    pub fn grid(mut self, grid: impl Into<String>) -> Axis {
        self.grid = Some(grid.into());
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Axis {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<String>) -> Axis {
        self.height = Some(height.into());
        self
    }

    /// `enlargelimits` value: a bool or a factor like `0.1`.
    pub fn enlargelimits(mut self, value: impl Into<Value>) -> Axis {
        self.enlargelimits = Some(value.into());
        self
    }

    pub fn clip(mut self, clip: bool) -> Axis {
        self.clip = Some(clip);
        self
    }

    /// `axis lines` setting: `left`, `center`, `right`, or `box`.
    pub fn axis_lines(mut self, lines: impl Into<String>) -> Axis {
        self.axis_lines = Some(lines.into());
        self
    }

    /// Append verbatim options.
    pub fn raw_options(mut self, options: impl Into<String>) -> Axis {
        self.raw_options = Some(options.into());
        self
    }
}

impl Renderable for Axis {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let mut options: Vec<(&str, Value)> = Vec::new();

        let labeled: [(&str, &Option<Content>); 4] = [
            ("xlabel", &self.xlabel),
            ("ylabel", &self.ylabel),
            ("zlabel", &self.zlabel),
            ("title", &self.title),
        ];
        for (key, content) in labeled {
            if let Some(content) = content {
                options.push((key, evaluate(content, data, scope, false)?.into()));
            }
        }

        let limits = [
            ("xmin", self.xmin),
            ("xmax", self.xmax),
            ("ymin", self.ymin),
            ("ymax", self.ymax),
            ("zmin", self.zmin),
            ("zmax", self.zmax),
        ];
        for (key, limit) in limits {
            if let Some(limit) = limit {
                options.push((key, limit.into()));
            }
        }

        if let Some(pos) = &self.legend_pos {
            options.push(("legend_pos", pos.as_str().into()));
        }
        if let Some(style) = &self.legend_style {
            options.push(("legend_style", style.as_str().into()));
        }
        if let Some(grid) = &self.grid {
            options.push(("grid", grid.as_str().into()));
        }
        if let Some(width) = &self.width {
            options.push(("width", width.as_str().into()));
        }
        if let Some(height) = &self.height {
            options.push(("height", height.as_str().into()));
        }
        if let Some(enlarge) = &self.enlargelimits {
            options.push(("enlargelimits", enlarge.clone()));
        }
        if let Some(clip) = self.clip {
            options.push(("clip", clip.into()));
        }
        if let Some(lines) = &self.axis_lines {
            options.push(("axis_lines", lines.as_str().into()));
        }

        let environment = self.kind.environment();
        let opts = format_options(&options, self.raw_options.as_deref());

        let mut lines = if opts.is_empty() {
            vec![format!("\\begin{{{environment}}}")]
        } else {
            vec![format!("\\begin{{{environment}}}[{opts}]")]
        };

        for plot in &self.plots {
            lines.push(format!("  {}", plot.render(data, scope)?));
        }

        if let Some(legend) = &self.legend {
            lines.push(format!("  {}", legend.render(data, scope)?));
        }

        lines.push(format!("\\end{{{environment}}}"));
        Ok(lines.join("\n"))
    }
}

/// A complete `tikzpicture` wrapping one [`Axis`].
#[derive(Debug, Clone)]
pub struct PGFPlot {
    axis: Axis,
    preamble: Vec<String>,
    scale: Option<f64>,
    raw_options: Option<String>,
}

impl PGFPlot {
    pub fn new(axis: Axis) -> PGFPlot {
        PGFPlot {
            axis,
            preamble: Vec::new(),
            scale: None,
            raw_options: None,
        }
    }

    /// Prepend a verbatim line before the `tikzpicture`.
    pub fn preamble_line(mut self, line: impl Into<String>) -> PGFPlot {
        self.preamble.push(line.into());
        self
    }

    pub fn scale(mut self, scale: f64) -> PGFPlot {
        self.scale = Some(scale);
        self
    }

    pub fn raw_options(mut self, options: impl Into<String>) -> PGFPlot {
        self.raw_options = Some(options.into());
        self
    }

    /// Render a standalone document including package imports.
    pub fn with_preamble(&self) -> SpecResult<String> {
        let content = self.render(&Value::Null, &Scope::new())?;
        Ok([
            "\\documentclass{standalone}",
            "\\usepackage{pgfplots}",
            "\\pgfplotsset{compat=1.18}",
            "",
            "\\begin{document}",
            &content,
            "\\end{document}",
        ]
        .join("\n"))
    }
}

impl Renderable for PGFPlot {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        trace!(plots = self.axis.plots.len(), "rendering pgfplot");
        let mut lines = self.preamble.clone();

        let mut options: Vec<(&str, Value)> = Vec::new();
        if let Some(scale) = self.scale {
            options.push(("scale", scale.into()));
        }
        let opts = format_options(&options, self.raw_options.as_deref());

        if opts.is_empty() {
            lines.push("\\begin{tikzpicture}".to_string());
        } else {
            lines.push(format!("\\begin{{tikzpicture}}[{opts}]"));
        }

        for line in self.axis.render(data, scope)?.split('\n') {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("  {line}"));
            }
        }

        lines.push("\\end{tikzpicture}".to_string());
        Ok(lines.join("\n"))
    }
}

/// Create a simple line plot from x and y data.
pub fn simple_plot(x: &[f64], y: &[f64], xlabel: &str, ylabel: &str) -> PGFPlot {
    let pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    PGFPlot::new(
        Axis::new().xlabel(xlabel).ylabel(ylabel).plot(
            AddPlot::new()
                .color("blue")
                .mark("*")
                .coords(Coordinates::from_pairs(&pairs)),
        ),
    )
}

impl From<Coordinates> for Content {
    fn from(coords: Coordinates) -> Content {
        Content::node(coords)
    }
}

impl From<AddPlot> for Content {
    fn from(plot: AddPlot) -> Content {
        Content::node(plot)
    }
}

impl From<Legend> for Content {
    fn from(legend: Legend) -> Content {
        Content::node(legend)
    }
}

impl From<Axis> for Content {
    fn from(axis: Axis) -> Content {
        Content::node(axis)
    }
}

impl From<PGFPlot> for Content {
    fn from(plot: PGFPlot) -> Content {
        Content::node(plot)
    }
}
