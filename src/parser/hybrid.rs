//! Range followed by percentage-indexed keyframes: `[min max] v,p ...`.

use crate::models::{InterpolationMode, Keyframe, ParseResult, Warning};

use super::options::Heuristics;
use super::range::expect_range_group;
use super::scalar::parse_pair;

/// Parse a leading range and its trailing `value,percent` words.
///
/// The range stays the source of the initial value; the keyframes describe
/// what happens afterwards. Percentages above the percent threshold are
/// divided by 100, smaller numbers are taken as already normalized. The
/// interpolation is always unspecified; a keyword in the tail is skipped
/// like any other non-pair word.
pub fn parse_hybrid(
    group: &str,
    trailing: &[&str],
    heuristics: &Heuristics,
    warnings: &mut Vec<Warning>,
) -> ParseResult {
    let Some((min, max)) = expect_range_group(group, warnings) else {
        return ParseResult::zero();
    };

    let mut keyframes = Vec::with_capacity(trailing.len());

    for word in trailing {
        match parse_pair(word) {
            Some((value, time)) => {
                keyframes.push(Keyframe::new(heuristics.normalize_time(time), value));
            }
            None => warnings.push(Warning::new(format!("Ignoring token '{}' after range", word))),
        }
    }

    ParseResult::range_with_keyframes(min, max, keyframes, InterpolationMode::Unspecified)
}
