//! Bracketed ranges: `[min max]` and `[v]`.

use crate::models::{ParseResult, Warning};

use super::scalar::parse_number;

/// Parse the inner text of a bracket group into `(min, max)`.
///
/// Two numbers are returned as given, with no ordering enforced. One
/// number is a degenerate point range. Anything else is `None`.
pub fn parse_range_group(inner: &str) -> Option<(f64, f64)> {
    let mut parts = inner.split_whitespace();
    let first = parse_number(parts.next()?)?;
    match (parts.next(), parts.next()) {
        (None, _) => Some((first, first)),
        (Some(second), None) => Some((first, parse_number(second)?)),
        (Some(_), Some(_)) => None,
    }
}

/// Like [`parse_range_group`], recording a warning on failure.
pub(crate) fn expect_range_group(inner: &str, warnings: &mut Vec<Warning>) -> Option<(f64, f64)> {
    let range = parse_range_group(inner);
    if range.is_none() {
        warnings.push(Warning::new(format!(
            "Bracket group '[{}]' must hold one or two numbers",
            inner
        )));
    }
    range
}

/// Plain range: `[min max]` or `[v]`. Parse failure yields the zero result.
pub fn parse_range(inner: &str, warnings: &mut Vec<Warning>) -> ParseResult {
    match expect_range_group(inner, warnings) {
        Some((min, max)) => ParseResult::range(min, max),
        None => ParseResult::zero(),
    }
}
