/*
 * color.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Hex color conversion for PGF/TikZ.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static HEX_COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^#?([0-9A-Fa-f]{6})$").unwrap_or_else(|e| panic!("invalid hex color regex: {e}"))
});

/// A color string that is not a 6-digit hex code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color code: '{0}' (expected '#RRGGBB' or 'RRGGBB')")]
pub struct InvalidHexColor(pub String);

/// Check whether a string is a valid hex color code (with or without `#`).
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR_PATTERN.is_match(color)
}

/// Convert a hex color code to PGF RGB format.
///
/// `"#5D8AA8"` becomes `"{rgb,255:red,93; green,138; blue,168}"`.
pub fn hex_to_pgf_rgb(color: &str) -> Result<String, InvalidHexColor> {
    let captures = HEX_COLOR_PATTERN
        .captures(color)
        .ok_or_else(|| InvalidHexColor(color.to_string()))?;
    let hex = &captures[1];

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| InvalidHexColor(color.to_string()))
    };
    let red = channel(0..2)?;
    let green = channel(2..4)?;
    let blue = channel(4..6)?;

    Ok(format!("{{rgb,255:red,{red}; green,{green}; blue,{blue}}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#5D8AA8"));
        assert!(is_hex_color("FF0000"));
        assert!(!is_hex_color("blue"));
        assert!(!is_hex_color("#GGG"));
        assert!(!is_hex_color("#12345"));
    }

    #[test]
    fn test_hex_to_pgf_rgb() {
        assert_eq!(
            hex_to_pgf_rgb("#5D8AA8").unwrap(),
            "{rgb,255:red,93; green,138; blue,168}"
        );
        assert_eq!(
            hex_to_pgf_rgb("#FF0000").unwrap(),
            "{rgb,255:red,255; green,0; blue,0}"
        );
        assert_eq!(
            hex_to_pgf_rgb("00FF00").unwrap(),
            "{rgb,255:red,0; green,255; blue,0}"
        );
    }

    #[test]
    fn test_invalid_hex_color() {
        assert_eq!(
            hex_to_pgf_rgb("teal").unwrap_err(),
            InvalidHexColor("teal".to_string())
        );
    }
}
