//! Query parameter normalization.

use super::types::SearchTerms;

pub const TEXT_PARAM: &str = "q";
pub const TYPE_PARAM: &str = "t";

/// Trims surrounding whitespace and removes one matching pair of `'` or `"` quotes.
///
/// Returns `None` when nothing is left, i.e. the parameter counts as absent.
pub fn normalize_param(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    let stripped = strip_quote_pair(trimmed);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

fn strip_quote_pair(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Value of `key` if it occurs exactly once. A repeated key is not a plain string.
pub fn single_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}

impl SearchTerms {
    pub fn new(text: Option<&str>, kind: Option<&str>) -> Self {
        Self {
            text: normalize_param(text),
            kind: normalize_param(kind),
        }
    }

    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        Self::new(
            single_value(pairs, TEXT_PARAM),
            single_value(pairs, TYPE_PARAM),
        )
    }

    pub fn is_type_filtered(&self) -> bool {
        self.kind.is_some()
    }
}
