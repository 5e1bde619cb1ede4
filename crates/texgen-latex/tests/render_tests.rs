/*
 * render_tests.rs
 * Copyright (c) 2025 Posit, PBC
 */

use pretty_assertions::assert_eq;
use texgen_latex::pgfplots::{AddPlot, Axis, AxisKind, Coordinates, Legend, PGFPlot};
use texgen_latex::tables::{Cell, Row, Table, Tabular};
use texgen_spec::{evaluate, Content, IterSpec, NumberFormat, Renderable, Scope, Spec, Value};

fn sales_data() -> Value {
    Value::from(serde_json::json!({
        "title": "Quarterly Sales",
        "rows": [
            { "region": "North", "units": 1520, "revenue": 45230.5, "best": false },
            { "region": "South", "units": 980, "revenue": 28104.0, "best": false },
            { "region": "West", "units": 2104, "revenue": 61877.25, "best": true },
        ],
    }))
}

#[test]
fn test_full_table_render() {
    let tabular = Tabular::new("lrr")
        .header(Row::new().cell("Region").cell("Units").cell("Revenue"))
        .row(IterSpec::over("rows").template(
            Row::new()
                .cell(Cell::new(Spec::reference("region")).bold_if(Spec::reference("best")))
                .cell(NumberFormat::new(Spec::reference("units")).thousands_sep())
                .cell(NumberFormat::new(Spec::reference("revenue")).decimals(2).thousands_sep()),
        ))
        .booktabs();

    let table = Table::new(tabular)
        .caption(Spec::reference("title"))
        .label("tab:sales");

    let output = table.render(&sales_data(), &Scope::new()).unwrap();
    let expected = "\
\\begin{table}[htbp]
  \\centering
  \\caption{Quarterly Sales}
  \\label{tab:sales}
  \\begin{tabular}{lrr}
    \\toprule
    Region & Units & Revenue \\\\
    \\midrule
    North & 1,520 & 45,230.50 \\\\
    South & 980 & 28,104.00 \\\\
    \\textbf{West} & 2,104 & 61,877.25 \\\\
    \\bottomrule
  \\end{tabular}
\\end{table}";
    assert_eq!(output, expected);
}

#[test]
fn test_table_as_content_is_not_escaped() {
    // Renderable output passes through the dispatch engine verbatim.
    let tabular = Tabular::new("l").row(Row::new().cell("100\\%"));
    let output = evaluate(
        &Content::from(tabular),
        &Value::Null,
        &Scope::new(),
        true,
    )
    .unwrap();
    assert_eq!(output, "\\begin{tabular}{l}\n  100\\% \\\\\n\\end{tabular}");
}

#[test]
fn test_full_plot_render() {
    let data = Value::from(serde_json::json!({
        "series": [
            { "t": 0, "v": 1.0 },
            { "t": 1, "v": 2.5 },
            { "t": 2, "v": 4.0 },
        ],
        "label": "Measured",
    }));

    let plot = PGFPlot::new(
        Axis::new()
            .xlabel("Time (s)")
            .ylabel("Value")
            .grid("major")
            .legend_pos("north west")
            .plot(
                AddPlot::new().color("blue").mark("*").coords(Coordinates::new(
                    IterSpec::over("series")
                        .x(Spec::reference("t"))
                        .y(Spec::reference("v")),
                )),
            )
            .plot(
                AddPlot::new()
                    .style("dashed")
                    .domain("0:2")
                    .samples(50)
                    .expression("x^2"),
            )
            .legend(Legend::new().entry(Spec::reference("label")).entry("Model")),
    );

    let output = plot.render(&data, &Scope::new()).unwrap();
    let expected = "\
\\begin{tikzpicture}
  \\begin{axis}[xlabel={Time (s)}, ylabel=Value, legend pos={north west}, grid=major]
    \\addplot[color=blue, mark=*] coordinates {(0, 1) (1, 2.5) (2, 4)};
    \\addplot[dashed, domain=0:2, samples=50] {x^2};
    \\legend{Measured, Model}
  \\end{axis}
\\end{tikzpicture}";
    assert_eq!(output, expected);
}

#[test]
fn test_semilog_axis_render() {
    let plot = PGFPlot::new(
        Axis::new()
            .kind(AxisKind::SemiLogY)
            .ylabel("Error")
            .plot(AddPlot::new().coords(Coordinates::from_pairs(&[(1.0, 0.1), (2.0, 0.01)]))),
    );

    let output = plot.render(&Value::Null, &Scope::new()).unwrap();
    let expected = "\
\\begin{tikzpicture}
  \\begin{semilogyaxis}[ylabel=Error]
    \\addplot coordinates {(1, 0.1) (2, 0.01)};
  \\end{semilogyaxis}
\\end{tikzpicture}";
    assert_eq!(output, expected);
}

#[test]
fn test_render_is_pure() {
    // Rendering the same node twice against different data gives
    // independent results.
    let tabular = Tabular::new("l").row(
        IterSpec::over("items").template(Row::new().cell(Spec::reference("name"))),
    );

    let first = Value::from(serde_json::json!({ "items": [{ "name": "a" }] }));
    let second = Value::from(serde_json::json!({ "items": [{ "name": "b" }, { "name": "c" }] }));

    let scope = Scope::new();
    assert_eq!(
        tabular.render(&first, &scope).unwrap(),
        "\\begin{tabular}{l}\n  a \\\\\n\\end{tabular}"
    );
    assert_eq!(
        tabular.render(&second, &scope).unwrap(),
        "\\begin{tabular}{l}\n  b \\\\\n  c \\\\\n\\end{tabular}"
    );
    assert_eq!(
        tabular.render(&first, &scope).unwrap(),
        "\\begin{tabular}{l}\n  a \\\\\n\\end{tabular}"
    );
}
