//! Alias-based field lookup.

use crate::table::Row;

/// Return the first candidate column that is present, non-blank, and accepted
/// by `cast`. A column whose value fails to cast does not stop the search.
pub fn resolve<T>(row: &Row, candidates: &[&str], cast: impl Fn(&str) -> Option<T>) -> Option<T> {
    candidates
        .iter()
        .filter_map(|c| row.get(*c))
        .filter(|v| !v.trim().is_empty())
        .find_map(|v| cast(v.as_str()))
}

/// Decimal integer, surrounding whitespace allowed.
pub fn as_int(v: &str) -> Option<i64> {
    v.trim().parse().ok()
}

/// Finite float, surrounding whitespace allowed.
pub fn as_float(v: &str) -> Option<f64> {
    v.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Trimmed text.
pub fn as_text(v: &str) -> Option<String> {
    Some(v.trim().to_string())
}
