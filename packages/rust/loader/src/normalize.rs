//! Multi-value field normalization.
//!
//! Upstream exports encode lists as Python-style strings such as
//! `"['Department of Labor', 'EPA']"`, not always consistently bracketed or
//! quoted. This is the single place that turns them into ordered lists.

use std::sync::LazyLock;

use regex::Regex;

/// Split a decorated comma list into trimmed, non-empty tokens.
///
/// Every `[`, `]` and `'` is removed wherever it appears, then the rest is
/// split on `,`. Order is preserved and duplicates are kept. Running this on
/// an already clean list (joined with commas) returns the same list.
pub fn split_multi_value(raw: &str) -> Vec<String> {
    static DECORATION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\[\]']").expect("valid regex"));

    DECORATION_RE
        .replace_all(raw, "")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// [`split_multi_value`] for a field that may be absent.
pub fn split_optional(raw: Option<&str>) -> Vec<String> {
    raw.map(split_multi_value).unwrap_or_default()
}
