/*
 * tables.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Table renderable nodes.
//!
//! Cells, rows, and the `tabular`/`table` environments. Every field that is
//! [`Content`] may hold a spec, so tables bind to data at render time:
//!
//! ```ignore
//! let tabular = Tabular::new("lc")
//!     .header(Row::new().cell("Name").cell("Value"))
//!     .row(IterSpec::over("data").template(
//!         Row::new().cell(Spec::reference("name")).cell(Spec::reference("v")),
//!     ))
//!     .booktabs();
//! ```

use texgen_spec::{
    evaluate, evaluate_value, resolve_value, Content, Renderable, Scope, SpecResult, Value,
};
use tracing::trace;

/// A table cell with optional bold/italic emphasis.
///
/// Emphasis flags may themselves be specs, for data-driven styling:
/// `Cell::new(Spec::reference("name")).bold_if(Spec::reference("important"))`.
#[derive(Debug, Clone)]
pub struct Cell {
    content: Content,
    bold: Content,
    italic: Content,
}

impl Cell {
    pub fn new(content: impl Into<Content>) -> Cell {
        Cell {
            content: content.into(),
            bold: false.into(),
            italic: false.into(),
        }
    }

    /// Always render bold.
    pub fn bold(self) -> Cell {
        self.bold_if(true)
    }

    /// Render bold when `condition` resolves truthy.
    pub fn bold_if(mut self, condition: impl Into<Content>) -> Cell {
        self.bold = condition.into();
        self
    }

    /// Always render italic.
    pub fn italic(self) -> Cell {
        self.italic_if(true)
    }

    /// Render italic when `condition` resolves truthy.
    pub fn italic_if(mut self, condition: impl Into<Content>) -> Cell {
        self.italic = condition.into();
        self
    }
}

impl Renderable for Cell {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let mut content = evaluate(&self.content, data, scope, false)?;
        if evaluate_value(&self.bold, data, scope)?.is_truthy() {
            content = format!("\\textbf{{{content}}}");
        }
        if evaluate_value(&self.italic, data, scope)?.is_truthy() {
            content = format!("\\textit{{{content}}}");
        }
        Ok(content)
    }
}

/// A cell spanning multiple columns.
#[derive(Debug, Clone)]
pub struct MultiColumn {
    ncols: u32,
    align: String,
    content: Content,
}

impl MultiColumn {
    pub fn new(ncols: u32, align: impl Into<String>, content: impl Into<Content>) -> MultiColumn {
        MultiColumn {
            ncols,
            align: align.into(),
            content: content.into(),
        }
    }
}

impl Renderable for MultiColumn {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let content = evaluate(&self.content, data, scope, false)?;
        Ok(format!(
            "\\multicolumn{{{}}}{{{}}}{{{content}}}",
            self.ncols, self.align
        ))
    }
}

/// A cell spanning multiple rows.
#[derive(Debug, Clone)]
pub struct MultiRow {
    nrows: u32,
    width: String,
    content: Content,
}

impl MultiRow {
    pub fn new(nrows: u32, content: impl Into<Content>) -> MultiRow {
        MultiRow {
            nrows,
            width: "*".to_string(),
            content: content.into(),
        }
    }

    /// Override the `*` width.
    pub fn width(mut self, width: impl Into<String>) -> MultiRow {
        self.width = width.into();
        self
    }
}

impl Renderable for MultiRow {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let content = evaluate(&self.content, data, scope, false)?;
        Ok(format!(
            "\\multirow{{{}}}{{{}}}{{{content}}}",
            self.nrows, self.width
        ))
    }
}

/// A table row: cells joined with ` & `, with a configurable line end.
#[derive(Debug, Clone)]
pub struct Row {
    cells: Vec<Content>,
    end: String,
}

impl Row {
    pub fn new() -> Row {
        Row {
            cells: Vec::new(),
            end: "\\\\".to_string(),
        }
    }

    /// Append a cell (a value, spec, or renderable like [`Cell`]).
    pub fn cell(mut self, content: impl Into<Content>) -> Row {
        self.cells.push(content.into());
        self
    }

    /// Replace the default `\\` line end (empty for none, `\\[4pt]` for
    /// extra vertical space).
    pub fn end(mut self, end: impl Into<String>) -> Row {
        self.end = end.into();
        self
    }
}

impl Default for Row {
    fn default() -> Self {
        Row::new()
    }
}

impl Renderable for Row {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let rendered: Vec<String> = self
            .cells
            .iter()
            .map(|cell| evaluate(cell, data, scope, false))
            .collect::<SpecResult<_>>()?;
        let row = rendered.join(" & ");
        if self.end.is_empty() {
            Ok(row)
        } else {
            Ok(format!("{row} {}", self.end))
        }
    }
}

/// A full-width horizontal rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct HLine;

impl Renderable for HLine {
    fn render(&self, _data: &Value, _scope: &Scope) -> SpecResult<String> {
        Ok("\\hline".to_string())
    }
}

/// A partial horizontal rule over columns `start..=end`.
#[derive(Debug, Clone, Copy)]
pub struct CLine {
    pub start: u32,
    pub end: u32,
}

impl CLine {
    pub fn new(start: u32, end: u32) -> CLine {
        CLine { start, end }
    }
}

impl Renderable for CLine {
    fn render(&self, _data: &Value, _scope: &Scope) -> SpecResult<String> {
        Ok(format!("\\cline{{{}-{}}}", self.start, self.end))
    }
}

/// A `tabular` environment.
///
/// Body entries are arbitrary content: a [`Row`], raw LaTeX, or an
/// iteration spec that expands to one line per item.
#[derive(Debug, Clone)]
pub struct Tabular {
    columns: String,
    header: Vec<Row>,
    rows: Vec<Content>,
    toprule: bool,
    midrule: bool,
    bottomrule: bool,
}

impl Tabular {
    pub fn new(columns: impl Into<String>) -> Tabular {
        Tabular {
            columns: columns.into(),
            header: Vec::new(),
            rows: Vec::new(),
            toprule: false,
            midrule: false,
            bottomrule: false,
        }
    }

    /// Append a header row.
    pub fn header(mut self, row: Row) -> Tabular {
        self.header.push(row);
        self
    }

    /// Append a body entry.
    pub fn row(mut self, entry: impl Into<Content>) -> Tabular {
        self.rows.push(entry.into());
        self
    }

    /// Enable all three booktabs rules.
    pub fn booktabs(self) -> Tabular {
        self.toprule().midrule().bottomrule()
    }

    pub fn toprule(mut self) -> Tabular {
        self.toprule = true;
        self
    }

    pub fn midrule(mut self) -> Tabular {
        self.midrule = true;
        self
    }

    pub fn bottomrule(mut self) -> Tabular {
        self.bottomrule = true;
        self
    }
}

impl Renderable for Tabular {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        trace!(columns = %self.columns, entries = self.rows.len(), "rendering tabular");
        let mut lines = vec![format!("\\begin{{tabular}}{{{}}}", self.columns)];

        if self.toprule {
            lines.push("  \\toprule".to_string());
        }

        for header in &self.header {
            lines.push(format!("  {}", header.render(data, scope)?));
        }
        if !self.header.is_empty() && (self.midrule || self.toprule) {
            lines.push("  \\midrule".to_string());
        }

        for entry in &self.rows {
            // An iteration entry resolves to a sequence: one line per item.
            match resolve_value(entry, data, scope)? {
                Content::Seq(items) => {
                    for item in &items {
                        lines.push(format!("  {}", evaluate(item, data, scope, false)?));
                    }
                }
                other => lines.push(format!("  {}", evaluate(&other, data, scope, false)?)),
            }
        }

        if self.bottomrule {
            lines.push("  \\bottomrule".to_string());
        }

        lines.push("\\end{tabular}".to_string());
        Ok(lines.join("\n"))
    }
}

/// A floating `table` environment wrapping a [`Tabular`].
#[derive(Debug, Clone)]
pub struct Table {
    content: Tabular,
    caption: Option<Content>,
    label: Option<String>,
    position: String,
    centering: bool,
}

impl Table {
    pub fn new(content: Tabular) -> Table {
        Table {
            content,
            caption: None,
            label: None,
            position: "htbp".to_string(),
            centering: true,
        }
    }

    /// Set the caption (any evaluable content).
    pub fn caption(mut self, caption: impl Into<Content>) -> Table {
        self.caption = Some(caption.into());
        self
    }

    /// Set the `\label` for cross-referencing.
    pub fn label(mut self, label: impl Into<String>) -> Table {
        self.label = Some(label.into());
        self
    }

    /// Override the default `htbp` float position.
    pub fn position(mut self, position: impl Into<String>) -> Table {
        self.position = position.into();
        self
    }

    pub fn no_centering(mut self) -> Table {
        self.centering = false;
        self
    }
}

impl Renderable for Table {
    fn render(&self, data: &Value, scope: &Scope) -> SpecResult<String> {
        let mut lines = vec![format!("\\begin{{table}}[{}]", self.position)];

        if self.centering {
            lines.push("  \\centering".to_string());
        }

        if let Some(caption) = &self.caption {
            let text = evaluate(caption, data, scope, false)?;
            lines.push(format!("  \\caption{{{text}}}"));
        }

        if let Some(label) = &self.label {
            lines.push(format!("  \\label{{{label}}}"));
        }

        for line in self.content.render(data, scope)?.split('\n') {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("  {line}"));
            }
        }

        lines.push("\\end{table}".to_string());
        Ok(lines.join("\n"))
    }
}

/// Trim specification for one side of a `\cmidrule`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Trim {
    /// No trim.
    #[default]
    Off,
    /// Default-width trim (`l` / `r`).
    On,
    /// Custom-width trim, e.g. `0.5em`.
    Width(String),
}

impl Trim {
    fn render(&self, side: char) -> String {
        match self {
            Trim::Off => String::new(),
            Trim::On => side.to_string(),
            Trim::Width(w) => format!("{side}{{{w}}}"),
        }
    }
}

/// Generate a single booktabs `\cmidrule` over columns `start..=end`.
pub fn cmidrule(start: u32, end: u32, trim_left: Trim, trim_right: Trim) -> String {
    let trim = if trim_left == Trim::Off && trim_right == Trim::Off {
        String::new()
    } else {
        format!("({}{})", trim_left.render('l'), trim_right.render('r'))
    };
    format!("\\cmidrule{trim}{{{start}-{end}}}")
}

/// Generate multiple `\cmidrule`s from column ranges.
///
/// With `trim_between`, adjacent rules get right/left trims so the rules do
/// not touch: the first rule is trimmed right, the last left, and middle
/// rules on both sides.
pub fn cmidrules(ranges: &[(u32, u32)], trim_between: bool) -> String {
    let last = ranges.len().saturating_sub(1);
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| {
            let (left, right) = if trim_between && ranges.len() > 1 {
                match i {
                    0 => (Trim::Off, Trim::On),
                    i if i == last => (Trim::On, Trim::Off),
                    _ => (Trim::On, Trim::On),
                }
            } else {
                (Trim::Off, Trim::Off)
            };
            cmidrule(start, end, left, right)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a simple booktabs table from headers and row data.
///
/// The first column is left-aligned, the rest centered.
pub fn simple_table(headers: &[&str], rows: Vec<Vec<Content>>) -> Table {
    let columns = format!("l{}", "c".repeat(headers.len().saturating_sub(1)));

    let header = headers
        .iter()
        .fold(Row::new(), |row, &h| row.cell(h));

    let mut tabular = Tabular::new(columns).header(header).booktabs();
    for cells in rows {
        let row = cells.into_iter().fold(Row::new(), |row, cell| row.cell(cell));
        tabular = tabular.row(row);
    }

    Table::new(tabular)
}

impl From<Cell> for Content {
    fn from(cell: Cell) -> Content {
        Content::node(cell)
    }
}

impl From<MultiColumn> for Content {
    fn from(mc: MultiColumn) -> Content {
        Content::node(mc)
    }
}

impl From<MultiRow> for Content {
    fn from(mr: MultiRow) -> Content {
        Content::node(mr)
    }
}

impl From<Row> for Content {
    fn from(row: Row) -> Content {
        Content::node(row)
    }
}

impl From<HLine> for Content {
    fn from(line: HLine) -> Content {
        Content::node(line)
    }
}

impl From<CLine> for Content {
    fn from(line: CLine) -> Content {
        Content::node(line)
    }
}

impl From<Tabular> for Content {
    fn from(tabular: Tabular) -> Content {
        Content::node(tabular)
    }
}

impl From<Table> for Content {
    fn from(table: Table) -> Content {
        Content::node(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use texgen_spec::{IterSpec, Spec};

    fn render(node: &impl Renderable, data: &Value) -> String {
        node.render(data, &Scope::new()).unwrap()
    }

    #[test]
    fn test_cell_emphasis() {
        let data = Value::Null;
        assert_eq!(render(&Cell::new("x"), &data), "x");
        assert_eq!(render(&Cell::new("x").bold(), &data), "\\textbf{x}");
        assert_eq!(
            render(&Cell::new("x").bold().italic(), &data),
            "\\textit{\\textbf{x}}"
        );
    }

    #[test]
    fn test_cell_conditional_bold() {
        let data = Value::from(serde_json::json!({ "important": true, "name": "total" }));
        let cell = Cell::new(Spec::reference("name")).bold_if(Spec::reference("important"));
        assert_eq!(render(&cell, &data), "\\textbf{total}");
    }

    #[test]
    fn test_multicolumn_and_multirow() {
        let data = Value::Null;
        assert_eq!(
            render(&MultiColumn::new(3, "c", "Header"), &data),
            "\\multicolumn{3}{c}{Header}"
        );
        assert_eq!(
            render(&MultiRow::new(2, "Category"), &data),
            "\\multirow{2}{*}{Category}"
        );
    }

    #[test]
    fn test_row_render() {
        let data = Value::from(serde_json::json!({ "v": 42 }));
        let row = Row::new().cell("Name").cell(Spec::reference("v"));
        assert_eq!(render(&row, &data), "Name & 42 \\\\");

        let bare = Row::new().cell("a").cell("b").end("");
        assert_eq!(render(&bare, &data), "a & b");
    }

    #[test]
    fn test_tabular_static_rows() {
        let data = Value::Null;
        let tabular = Tabular::new("lc")
            .header(Row::new().cell("Name").cell("Value"))
            .row(Row::new().cell("a").cell(1))
            .row(Row::new().cell("b").cell(2))
            .booktabs();

        let expected = "\\begin{tabular}{lc}\n  \\toprule\n  Name & Value \\\\\n  \\midrule\n  a & 1 \\\\\n  b & 2 \\\\\n  \\bottomrule\n\\end{tabular}";
        assert_eq!(render(&tabular, &data), expected);
    }

    #[test]
    fn test_tabular_iteration_rows() {
        let data = Value::from(serde_json::json!({
            "data": [
                { "name": "a", "v": 1 },
                { "name": "b", "v": 2 },
            ],
        }));
        let tabular = Tabular::new("lc").row(
            IterSpec::over("data")
                .template(Row::new().cell(Spec::reference("name")).cell(Spec::reference("v"))),
        );

        let expected = "\\begin{tabular}{lc}\n  a & 1 \\\\\n  b & 2 \\\\\n\\end{tabular}";
        assert_eq!(render(&tabular, &data), expected);
    }

    #[test]
    fn test_table_wrapper() {
        let data = Value::Null;
        let table = Table::new(Tabular::new("l").row(Row::new().cell("x")))
            .caption("My Table")
            .label("tab:mine");

        let expected = "\\begin{table}[htbp]\n  \\centering\n  \\caption{My Table}\n  \\label{tab:mine}\n  \\begin{tabular}{l}\n    x \\\\\n  \\end{tabular}\n\\end{table}";
        assert_eq!(render(&table, &data), expected);
    }

    #[test]
    fn test_hline_and_cline() {
        let data = Value::Null;
        assert_eq!(render(&HLine, &data), "\\hline");
        assert_eq!(render(&CLine::new(2, 4), &data), "\\cline{2-4}");
    }

    #[test]
    fn test_cmidrule_single() {
        assert_eq!(cmidrule(1, 3, Trim::Off, Trim::Off), "\\cmidrule{1-3}");
        assert_eq!(cmidrule(2, 4, Trim::On, Trim::On), "\\cmidrule(lr){2-4}");
        assert_eq!(
            cmidrule(2, 4, Trim::Width("0.5em".to_string()), Trim::Off),
            "\\cmidrule(l{0.5em}){2-4}"
        );
    }

    #[test]
    fn test_cmidrules_between() {
        assert_eq!(
            cmidrules(&[(2, 4), (5, 7)], false),
            "\\cmidrule{2-4} \\cmidrule{5-7}"
        );
        assert_eq!(
            cmidrules(&[(2, 4), (5, 7)], true),
            "\\cmidrule(r){2-4} \\cmidrule(l){5-7}"
        );
        assert_eq!(
            cmidrules(&[(1, 2), (3, 4), (5, 6)], true),
            "\\cmidrule(r){1-2} \\cmidrule(lr){3-4} \\cmidrule(l){5-6}"
        );
    }

    #[test]
    fn test_simple_table() {
        let data = Value::Null;
        let table = simple_table(
            &["Name", "Value"],
            vec![vec!["a".into(), 1.into()], vec!["b".into(), 2.into()]],
        );
        let out = render(&table, &data);
        assert!(out.contains("\\begin{tabular}{lc}"));
        assert!(out.contains("  a & 1 \\\\"));
        assert!(out.contains("\\toprule"));
    }
}
