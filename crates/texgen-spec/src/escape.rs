/*
 * escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! LaTeX special-character escaping.
//!
//! The engine applies this table exactly once per scalar on the plain-value
//! path of [`evaluate`](crate::eval::evaluate). Raw content bypasses it.

/// Escape LaTeX special characters in text.
///
/// The characters `& % $ # _ { } ~ ^ \` map to their escaped forms.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_percent_and_dollar() {
        assert_eq!(escape_latex("10% off"), "10\\% off");
        assert_eq!(escape_latex("$100"), "\\$100");
    }

    #[test]
    fn test_escape_braces_and_underscore() {
        assert_eq!(escape_latex("a_{b}"), "a\\_\\{b\\}");
    }

    #[test]
    fn test_escape_text_commands() {
        assert_eq!(escape_latex("~"), "\\textasciitilde{}");
        assert_eq!(escape_latex("^"), "\\textasciicircum{}");
        assert_eq!(escape_latex("\\"), "\\textbackslash{}");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_latex("hello world"), "hello world");
    }
}
