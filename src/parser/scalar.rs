//! Bare numbers and the fixed-value fallback.

use crate::models::{ParseResult, Warning};
use crate::tokenizer::Token;

/// Parse a single numeric token such as `1500`, `-10.5` or `.4`.
///
/// Non-finite spellings (`inf`, `NaN`) are rejected.
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a `a,b` comma pair. Both halves must be numbers.
pub fn parse_pair(token: &str) -> Option<(f64, f64)> {
    let (a, b) = token.split_once(',')?;
    Some((parse_number(a)?, parse_number(b)?))
}

/// Fixed-value fallback: exactly one numeric word becomes `min = max = value`.
///
/// Anything else yields the zero result and a warning.
pub fn parse_fixed(tokens: &[Token<'_>], warnings: &mut Vec<Warning>) -> ParseResult {
    match tokens {
        [Token::Word(word)] => match parse_number(word) {
            Some(value) => ParseResult::fixed(value),
            None => {
                warnings.push(Warning::new(format!("Cannot parse '{}' as a number", word)));
                ParseResult::zero()
            }
        },
        _ => {
            warnings.push(Warning::new("No value recognised, using 0"));
            ParseResult::zero()
        }
    }
}
