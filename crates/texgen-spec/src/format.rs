/*
 * format.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Number and format-specifier machinery backing the `Format` and
//! `FormatNumber` spec variants.
//!
//! Format specifiers follow the familiar printf-style mini-language subset
//! `[0][width][.precision][type]` with types `f`, `%`, `d`, `e`, `g`, `s`.
//! Scientific output uses a signed two-digit exponent (`1.5e+02`).

use crate::error::{SpecError, SpecResult};
use crate::value::Value;

/// A parsed format specifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FormatSpec {
    zero_pad: bool,
    width: Option<usize>,
    precision: Option<usize>,
    kind: Option<char>,
}

fn parse_format_spec(fmt: &str) -> SpecResult<FormatSpec> {
    let mut spec = FormatSpec::default();
    let mut rest = fmt;

    if let Some(stripped) = rest.strip_prefix('0') {
        spec.zero_pad = true;
        rest = stripped;
    }

    let width_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if width_len > 0 {
        spec.width = rest[..width_len].parse().ok();
        rest = &rest[width_len..];
    }

    if let Some(stripped) = rest.strip_prefix('.') {
        let prec_len = stripped.chars().take_while(|c| c.is_ascii_digit()).count();
        if prec_len == 0 {
            return Err(SpecError::Configuration {
                message: format!("format spec '{fmt}' has '.' without a precision"),
            });
        }
        spec.precision = stripped[..prec_len].parse().ok();
        rest = &stripped[prec_len..];
    }

    match rest {
        "" => {}
        "f" | "%" | "d" | "e" | "g" | "s" => {
            spec.kind = rest.chars().next();
        }
        other => {
            return Err(SpecError::Configuration {
                message: format!("unsupported format spec '{fmt}' (unrecognized '{other}')"),
            });
        }
    }

    Ok(spec)
}

/// Apply a format specifier to a resolved value.
pub fn apply_format(value: &Value, fmt: &str) -> SpecResult<String> {
    let spec = parse_format_spec(fmt)?;

    let text = match spec.kind {
        Some('f') => format!("{:.*}", spec.precision.unwrap_or(6), require_number(value, fmt)?),
        Some('%') => {
            let scaled = require_number(value, fmt)? * 100.0;
            format!("{:.*}%", spec.precision.unwrap_or(6), scaled)
        }
        Some('d') => require_integer(value, fmt)?.to_string(),
        Some('e') => {
            let n = require_number(value, fmt)?;
            normalize_exponent(&format!("{:.*e}", spec.precision.unwrap_or(6), n))
        }
        Some('g') => format_sig(require_number(value, fmt)?, spec.precision.unwrap_or(6) as u32),
        Some('s') => value.to_output_string(),
        Some(_) => unreachable!("parse_format_spec rejects unknown types"),
        None => match (spec.precision, value.as_number()) {
            (Some(precision), Some(n)) => format_sig(n, precision as u32),
            _ => value.to_output_string(),
        },
    };

    Ok(pad(text, &spec, value))
}

fn require_number(value: &Value, fmt: &str) -> SpecResult<f64> {
    value.as_number().ok_or_else(|| SpecError::TypeMismatch {
        message: format!("format spec '{fmt}' requires a number, got {}", value.kind()),
    })
}

fn require_integer(value: &Value, fmt: &str) -> SpecResult<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
        other => Err(SpecError::TypeMismatch {
            message: format!("format spec '{fmt}' requires an integer, got {}", other.kind()),
        }),
    }
}

fn pad(text: String, spec: &FormatSpec, value: &Value) -> String {
    let Some(width) = spec.width else {
        return text;
    };
    if text.len() >= width {
        return text;
    }
    let fill = width - text.len();
    if spec.zero_pad && value.as_number().is_some() {
        // Zeros go between the sign and the digits.
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        format!("{sign}{}{digits}", "0".repeat(fill))
    } else if value.as_number().is_some() {
        format!("{}{text}", " ".repeat(fill))
    } else {
        format!("{text}{}", " ".repeat(fill))
    }
}

/// Format a number to `sig` significant digits, `%g` style.
///
/// Exponents below -4 or at/above `sig` switch to scientific notation;
/// trailing zeros are trimmed in both forms.
pub fn format_sig(value: f64, sig: u32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let sig = sig.max(1);

    let exponent = decimal_exponent(value);
    if exponent < -4 || exponent >= sig as i32 {
        let formatted = format!("{:.*e}", (sig - 1) as usize, value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let mantissa = trim_trailing_zeros(mantissa);
                let exp: i32 = exp.parse().unwrap_or(0);
                format!(
                    "{mantissa}e{}{:02}",
                    if exp < 0 { '-' } else { '+' },
                    exp.abs()
                )
            }
            None => formatted,
        }
    } else {
        let decimals = (sig as i32 - 1 - exponent).max(0) as usize;
        trim_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// The decimal exponent of a non-zero number.
fn decimal_exponent(value: f64) -> i32 {
    let formatted = format!("{:e}", value.abs());
    match formatted.split_once('e') {
        Some((_, exp)) => exp.parse().unwrap_or(0),
        None => 0,
    }
}

/// Rewrite Rust's bare exponent (`1.5e2`) as signed two-digit (`1.5e+02`).
fn normalize_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            format!(
                "{mantissa}e{}{:02}",
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            )
        }
        None => formatted.to_string(),
    }
}

fn trim_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Remove the minus sign from a formatted value that is exactly zero.
pub fn strip_negative_zero(s: String) -> String {
    if let Some(rest) = s.strip_prefix('-') {
        if rest.parse::<f64>().map(|v| v == 0.0).unwrap_or(false) {
            return rest.to_string();
        }
    }
    s
}

/// Group the integer part of a formatted number in runs of three.
///
/// Scientific-notation strings are returned unchanged.
pub fn add_thousands_separator(s: &str, sep: &str) -> String {
    if s.contains('e') || s.contains('E') {
        return s.to_string();
    }

    let (int_part, dec_part) = match s.split_once('.') {
        Some((i, d)) => (i, format!(".{d}")),
        None => (s, String::new()),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(sep);
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}{dec_part}")
}
