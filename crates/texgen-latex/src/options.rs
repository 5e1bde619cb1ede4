/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! LaTeX option-list formatting.
//!
//! PGFPlots and tikz commands take `key=value` option lists in square
//! brackets. Values come in as engine [`Value`]s: boolean `true` renders as
//! a bare key, `false` and null options are skipped, strings are wrapped in
//! braces when they would otherwise split the option list.

use texgen_spec::Value;

/// Format a single option value.
///
/// Strings containing spaces or any of `,=[]` are brace-wrapped, unless
/// they already are.
pub fn format_option_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => String::new(),
        Value::Int(_) | Value::Float(_) => value.to_output_string(),
        other => {
            let s = other.to_output_string();
            if s.starts_with('{') && s.ends_with('}') {
                return s;
            }
            if s.contains(' ') || s.chars().any(|c| ",=[]".contains(c)) {
                format!("{{{s}}}")
            } else {
                s
            }
        }
    }
}

/// Format an option list (without the surrounding brackets).
///
/// Null and `false` options are skipped, boolean `true` options emit just
/// the key, and underscores in keys become spaces (`legend_pos` →
/// `legend pos`). A raw options tail is appended verbatim.
pub fn format_options(options: &[(&str, Value)], raw_options: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(options.len());
    for (key, value) in options {
        let latex_key = key.replace('_', " ");
        match value {
            Value::Null | Value::Bool(false) => continue,
            Value::Bool(true) => parts.push(latex_key),
            other => parts.push(format!("{latex_key}={}", format_option_value(other))),
        }
    }
    if let Some(raw) = raw_options {
        parts.push(raw.to_string());
    }
    parts.join(", ")
}

/// Indent each non-empty line of text.
pub fn indent(text: &str, spaces: usize) -> String {
    let prefix = " ".repeat(spaces);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap content in a LaTeX environment.
pub fn wrap_environment(name: &str, content: &str, options: &str) -> String {
    let begin = if options.is_empty() {
        format!("\\begin{{{name}}}")
    } else {
        format!("\\begin{{{name}}}[{options}]")
    };
    format!("{begin}\n{}\n\\end{{{name}}}", indent(content, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_option_value_scalars() {
        assert_eq!(format_option_value(&Value::Bool(true)), "true");
        assert_eq!(format_option_value(&Value::Bool(false)), "false");
        assert_eq!(format_option_value(&Value::Null), "");
        assert_eq!(format_option_value(&Value::Float(3.14)), "3.14");
        assert_eq!(format_option_value(&Value::Int(5)), "5");
    }

    #[test]
    fn test_option_value_string_wrapping() {
        assert_eq!(format_option_value(&Value::from("north west")), "{north west}");
        assert_eq!(format_option_value(&Value::from("blue")), "blue");
        assert_eq!(format_option_value(&Value::from("{already}")), "{already}");
        assert_eq!(format_option_value(&Value::from("a,b")), "{a,b}");
    }

    #[test]
    fn test_format_options() {
        let options = [
            ("xlabel", Value::from("Time (s)")),
            ("ylabel", Value::from("Value")),
            ("grid", Value::from("major")),
        ];
        assert_eq!(
            format_options(&options, None),
            "xlabel={Time (s)}, ylabel=Value, grid=major"
        );
    }

    #[test]
    fn test_format_options_booleans_and_raw_tail() {
        let options = [
            ("smooth", Value::Bool(true)),
            ("clip", Value::Bool(false)),
            ("samples", Value::Null),
            ("legend_pos", Value::from("north west")),
        ];
        assert_eq!(
            format_options(&options, Some("very thick")),
            "smooth, legend pos={north west}, very thick"
        );
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", 2), "  a\n\n  b");
    }

    #[test]
    fn test_wrap_environment() {
        assert_eq!(
            wrap_environment("center", "x", ""),
            "\\begin{center}\n  x\n\\end{center}"
        );
        assert_eq!(
            wrap_environment("axis", "x", "grid=major"),
            "\\begin{axis}[grid=major]\n  x\n\\end{axis}"
        );
    }
}
