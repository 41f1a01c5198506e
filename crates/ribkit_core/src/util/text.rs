//! String predicate and token formatting helpers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new("%s").expect("valid token regex"));

/// Whether a dynamic value holds a string.
///
/// Mirrors the construction-time check that decides if a configured `el`
/// value is a selector needing resolution.
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// Replaces `%s` placeholders left-to-right with the given values.
///
/// Placeholders beyond the provided values resolve to the empty string;
/// surplus values are ignored.
pub fn format_tokens(template: &str, values: &[&str]) -> String {
    let mut remaining = values.iter();
    TOKEN_RE
        .replace_all(template, |_: &regex::Captures<'_>| {
            remaining.next().copied().unwrap_or("")
        })
        .into_owned()
}
