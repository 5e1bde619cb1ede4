/*
 * eval.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The resolution/dispatch engine.
//!
//! [`evaluate`] is the main entry point for turning any content into a
//! LaTeX string. It pattern-matches on the content variant:
//!
//! - null → empty string
//! - raw spec → its text verbatim, bypassing escaping
//! - spec → resolve once, then evaluate the result (this is how a
//!   conditional's unresolved branch and an iteration's per-item results
//!   get fully resolved)
//! - renderable node → delegate to its `render`
//! - sequence → evaluate each element and concatenate
//! - plain scalar → convert to string, escaping LaTeX specials unless
//!   `escape` is false
//!
//! [`evaluate_value`] performs the same resolution without the final
//! stringification/escaping, for callers that need the resolved value
//! itself. [`resolve_value`] resolves exactly one layer.

use crate::content::Content;
use crate::error::SpecResult;
use crate::escape::escape_latex;
use crate::scope::Scope;
use crate::spec::Spec;
use crate::value::Value;

/// Evaluate content to a LaTeX string.
pub fn evaluate(element: &Content, data: &Value, scope: &Scope, escape: bool) -> SpecResult<String> {
    match element {
        Content::Value(Value::Null) => Ok(String::new()),

        Content::Spec(spec) => match spec.as_ref() {
            // Raw bypasses both resolution and escaping.
            Spec::Raw(latex) => Ok(latex.clone()),
            other => {
                let resolved = other.resolve(data, scope)?;
                evaluate(&resolved, data, scope, escape)
            }
        },

        Content::Node(node) => node.render(data, scope),

        Content::Seq(items) => {
            let mut out = String::new();
            for item in items {
                out.push_str(&evaluate(item, data, scope, escape)?);
            }
            Ok(out)
        }

        Content::Value(value) => {
            let text = value.to_output_string();
            Ok(if escape { escape_latex(&text) } else { text })
        }
    }
}

/// Evaluate content to a resolved [`Value`], without stringification.
///
/// Renderable nodes are rendered to string values; sequences become lists.
pub fn evaluate_value(element: &Content, data: &Value, scope: &Scope) -> SpecResult<Value> {
    match element {
        Content::Value(value) => Ok(value.clone()),
        Content::Spec(spec) => {
            let resolved = spec.resolve(data, scope)?;
            evaluate_value(&resolved, data, scope)
        }
        Content::Node(node) => Ok(Value::Str(node.render(data, scope)?)),
        Content::Seq(items) => {
            let values: Vec<Value> = items
                .iter()
                .map(|item| evaluate_value(item, data, scope))
                .collect::<SpecResult<_>>()?;
            Ok(Value::List(values))
        }
    }
}

/// Resolve content one layer: specs are resolved once, everything else is
/// returned unchanged.
pub fn resolve_value(element: &Content, data: &Value, scope: &Scope) -> SpecResult<Content> {
    match element {
        Content::Spec(spec) => spec.resolve(data, scope),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Renderable;
    use crate::spec::IterSpec;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn data() -> Value {
        Value::from(json!({
            "name": "Alice",
            "value": 42,
            "pct": 0.15,
            "items": [
                { "n": "a", "v": 1 },
                { "n": "b", "v": 2 },
            ],
        }))
    }

    fn eval(content: impl Into<Content>) -> String {
        evaluate(&content.into(), &data(), &Scope::new(), true).unwrap()
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(eval(Content::null()), "");
    }

    #[test]
    fn test_plain_scalar_is_escaped() {
        assert_eq!(eval("50% done"), "50\\% done");
        assert_eq!(eval(42), "42");
    }

    #[test]
    fn test_escape_disabled() {
        let out = evaluate(&"a_b".into(), &data(), &Scope::new(), false).unwrap();
        assert_eq!(out, "a_b");
    }

    #[test]
    fn test_raw_bypasses_escaping() {
        assert_eq!(eval(Spec::raw("\\textbf{bold}")), "\\textbf{bold}");
    }

    #[test]
    fn test_reference_resolution() {
        assert_eq!(eval(Spec::reference("name")), "Alice");
        assert_eq!(eval(Spec::reference("items.1.n")), "b");
    }

    #[test]
    fn test_reference_value_escaped_once() {
        let mut map = std::collections::HashMap::new();
        map.insert("text".to_string(), Value::from("5% of $10"));
        let data = Value::Map(map);
        let out = evaluate(&Spec::reference("text").into(), &data, &Scope::new(), true).unwrap();
        assert_eq!(out, "5\\% of \\$10");
    }

    #[test]
    fn test_sequence_concatenation() {
        let seq = Content::Seq(vec!["a".into(), Spec::reference("value").into(), "c".into()]);
        assert_eq!(eval(seq), "a42c");
    }

    #[test]
    fn test_cond_branch_evaluated_one_level_up() {
        // A raw false-branch must stay raw through Cond dispatch.
        let spec = Spec::cond(Spec::reference("value").gt(100), "plain", Spec::raw("\\hline"));
        assert_eq!(eval(spec), "\\hline");
    }

    #[test]
    fn test_cond_equals_direct_branch_evaluation() {
        let branch: Content = Spec::format(Spec::reference("pct"), ".1%").into();
        let cond = Spec::cond(true, branch.clone(), "");
        assert_eq!(eval(cond), eval(branch));
    }

    #[test]
    fn test_evaluate_value_resolves_fully() {
        let cond = Spec::cond(Spec::reference("value").gt(5), Spec::reference("name"), "");
        let value = evaluate_value(&cond.into(), &data(), &Scope::new()).unwrap();
        assert_eq!(value, Value::from("Alice"));
    }

    #[test]
    fn test_evaluate_value_of_iteration() {
        let iter = IterSpec::over("items").template(Spec::reference("v"));
        let value = evaluate_value(&iter.into(), &data(), &Scope::new()).unwrap();
        assert_eq!(value, Value::List(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn test_resolve_value_is_one_layer() {
        // Cond selects a branch; resolve_value must not resolve the branch.
        let cond = Spec::cond(true, Spec::reference("name"), "");
        let resolved = resolve_value(&cond.into(), &data(), &Scope::new()).unwrap();
        assert!(matches!(
            resolved,
            Content::Spec(ref s) if matches!(s.as_ref(), Spec::Ref { .. })
        ));
    }

    #[derive(Debug)]
    struct Stamp;

    impl Renderable for Stamp {
        fn render(&self, data: &Value, _scope: &Scope) -> SpecResult<String> {
            let Value::Map(map) = data else {
                return Ok("?".to_string());
            };
            Ok(format!(
                "[{}]",
                map.get("name").cloned().unwrap_or_default().to_output_string()
            ))
        }
    }

    #[test]
    fn test_node_delegation() {
        assert_eq!(eval(Content::node(Stamp)), "[Alice]");
    }

    #[test]
    fn test_scope_shadows_data() {
        let scope = Scope::new().bind("name", "shadowed");
        let out = evaluate(&Spec::reference("name").into(), &data(), &scope, true).unwrap();
        assert_eq!(out, "shadowed");
    }
}
