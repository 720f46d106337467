//! Checks a stylesheet against the token set: every string token should have
//! a CSS variable, and colour, spacing and component variables should have
//! matching utility classes.

use crate::ast::{TokenDocument, TokenValue};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--[a-zA-Z0-9\-]+").expect("variable pattern is valid"));
static SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([a-zA-Z0-9\-]+)\s*\{").expect("selector pattern is valid"));

// Utility classes assumed per token variable when computing the total.
const SELECTORS_PER_TOKEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub total: usize,
    pub covered: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub missing_selectors: Vec<String>,
    pub unused_tokens: Vec<String>,
    pub suggestions: Vec<String>,
    pub coverage: Coverage,
}

/// Variable names expected for the string-valued leaves of `document`.
pub fn expected_variables(document: &TokenDocument) -> Vec<String> {
    let mut names = Vec::new();
    for (category, group) in document.iter() {
        let mut path = vec![category.name()];
        group.for_each_leaf(&mut path, &mut |segments, token| {
            if matches!(token.value, TokenValue::Text(_)) {
                names.push(format!("--{}", segments.join("-")));
            }
        });
    }
    names
}

fn expected_selectors(var: &str) -> Vec<String> {
    let bare = &var[2..];
    let mut selectors = Vec::new();
    if var.contains("color") {
        for prefix in ["bg", "text", "border"] {
            selectors.push(format!(".{prefix}-{bare}"));
        }
    }
    if var.contains("space") {
        for prefix in ["p", "m", "gap"] {
            selectors.push(format!(".{prefix}-{bare}"));
        }
    }
    for kind in ["font-family", "font-size", "font-weight"] {
        if var.contains(kind) {
            let name = var.replacen(&format!("--{kind}-"), "", 1);
            selectors.push(format!(".{kind}-{name}"));
        }
    }
    if var.contains("component") {
        selectors.push(format!(".{bare}"));
    }
    selectors
}

/// Validates `css` against `document`.
pub fn validate(document: &TokenDocument, css: &str) -> CoverageReport {
    let variables: HashSet<&str> = VARIABLE_RE.find_iter(css).map(|m| m.as_str()).collect();
    let selectors: HashSet<String> = SELECTOR_RE
        .captures_iter(css)
        .map(|c| format!(".{}", &c[1]))
        .collect();

    let expected = expected_variables(document);
    let mut missing_selectors = Vec::new();
    let mut unused_tokens = Vec::new();
    let mut suggestions = Vec::new();

    for var in &expected {
        if !variables.contains(var.as_str()) {
            suggestions.push(format!("Add CSS variable: {var}"));
            unused_tokens.push(var.clone());
            continue;
        }
        for selector in expected_selectors(var) {
            if !selectors.contains(&selector) {
                suggestions.push(format!("Add selector: {selector} {{ /* appropriate CSS */ }}"));
                missing_selectors.push(selector);
            }
        }
    }

    let total = expected.len() * SELECTORS_PER_TOKEN;
    let covered = total.saturating_sub(missing_selectors.len());
    let percentage = if total == 0 {
        0
    } else {
        ((covered as f64 / total as f64) * 100.0).round() as u32
    };
    log::info!("Token coverage: {percentage}% ({covered}/{total})");

    CoverageReport {
        missing_selectors,
        unused_tokens,
        suggestions,
        coverage: Coverage {
            total,
            covered,
            percentage,
        },
    }
}
