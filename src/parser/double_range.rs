//! Double ranges `[a b] [c d]` and the range-value companion parser.
//!
//! The same bracket syntax means two different things depending on the
//! property that carries it, so each reading has its own function:
//!
//! - [`random_interpolated`]: draw a start value from the first range and
//!   an end value from the second, then interpolate linearly.
//! - [`width_interpolated`]: interpolate the absolute width of the range,
//!   as emitter boxes do. [`range_tracks`] adds the lower-bound track.

use rand::Rng;

use crate::models::{InterpolationMode, Keyframe, ParseResult, RangeTracks, Warning};
use crate::sampler::sample;

use super::range::expect_range_group;

/// Both groups of a double range as `((start_min, start_max), (end_min, end_max))`.
pub type RangePair = ((f64, f64), (f64, f64));

pub(crate) fn parse_groups(first: &str, second: &str, warnings: &mut Vec<Warning>) -> Option<RangePair> {
    let start = expect_range_group(first, warnings);
    let end = expect_range_group(second, warnings);
    Some((start?, end?))
}

/// `{0, sample(start)}` to `{1, sample(end)}`, linear.
pub fn random_interpolated<R: Rng + ?Sized>(ranges: RangePair, rng: &mut R) -> ParseResult {
    let ((start_min, start_max), (end_min, end_max)) = ranges;
    let start = sample(rng, start_min, start_max);
    let end = sample(rng, end_min, end_max);
    ParseResult::sequence(
        vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)],
        InterpolationMode::Linear,
    )
}

/// `{0, |start_max - start_min|}` to `{1, |end_max - end_min|}`, linear.
pub fn width_interpolated(ranges: RangePair) -> ParseResult {
    let ((start_min, start_max), (end_min, end_max)) = ranges;
    ParseResult::sequence(
        vec![
            Keyframe::new(0.0, (start_max - start_min).abs()),
            Keyframe::new(1.0, (end_max - end_min).abs()),
        ],
        InterpolationMode::Linear,
    )
}

/// Lower-bound and width tracks for a double range.
pub fn range_tracks(ranges: RangePair) -> RangeTracks {
    let ((start_min, start_max), (end_min, _)) = ranges;
    let width = width_interpolated(ranges);
    RangeTracks {
        initial_min: start_min,
        initial_max: start_max,
        min_track: vec![Keyframe::new(0.0, start_min), Keyframe::new(1.0, end_min)],
        width_track: width.keyframes,
        interpolation: InterpolationMode::Linear,
    }
}
