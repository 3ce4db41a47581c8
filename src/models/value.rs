//! Normalized value descriptors produced by the value parser.

use serde::{Deserialize, Serialize};

use super::keyframe::{InterpolationMode, Keyframe};

/// The normalized result of parsing one property value string.
///
/// Both the range (`min`, `max`) and the keyframe list are always present,
/// but only one is semantically active for a plain range or keyframe
/// sequence. The range+keyframe form keeps both: the range supplies the
/// initial value and the keyframes describe what follows. That form is
/// marked by `range_start`, since any range (including `[0 0]`) can lead it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ParseResult {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub interpolation: InterpolationMode,
    /// The curve starts from a sample of `[min, max]`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub range_start: bool,
}

/// Which part of a [`ParseResult`] is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `min == max`, no keyframes
    Fixed,
    /// Uniform random range, no keyframes
    Range,
    /// Keyframe sequence; the range is unused
    Keyframes,
    /// Random initial value from the range, followed by keyframes
    RangeWithKeyframes,
}

impl ParseResult {
    /// The fail-soft result `{0, 0, [], ""}`.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn fixed(value: f64) -> Self {
        Self::range(value, value)
    }

    /// A range result. The bounds are stored as given; `min > max` is allowed.
    pub fn range(min: f64, max: f64) -> Self {
        Self { min, max, keyframes: Vec::new(), interpolation: InterpolationMode::Unspecified, range_start: false }
    }

    pub fn sequence(keyframes: Vec<Keyframe>, interpolation: InterpolationMode) -> Self {
        Self { min: 0.0, max: 0.0, keyframes, interpolation, range_start: false }
    }

    /// A range whose sample starts the curve, followed by `keyframes`.
    ///
    /// Without keyframes this is a plain range.
    pub fn range_with_keyframes(
        min: f64,
        max: f64,
        keyframes: Vec<Keyframe>,
        interpolation: InterpolationMode,
    ) -> Self {
        let range_start = !keyframes.is_empty();
        Self { min, max, keyframes, interpolation, range_start }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn has_keyframes(&self) -> bool {
        !self.keyframes.is_empty()
    }

    pub fn kind(&self) -> ValueKind {
        if self.keyframes.is_empty() {
            if self.min == self.max {
                ValueKind::Fixed
            } else {
                ValueKind::Range
            }
        } else if self.range_start {
            ValueKind::RangeWithKeyframes
        } else {
            ValueKind::Keyframes
        }
    }

    /// True when keyframe times never decrease.
    pub fn is_monotonic(&self) -> bool {
        self.keyframes.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

/// Paired tracks for emitter-box style ranges.
///
/// The lower bound and the width of a range animate independently: at time
/// `t` the live range is `[min_track(t), min_track(t) + width_track(t)]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RangeTracks {
    /// Raw initial lower bound as authored
    pub initial_min: f64,
    /// Raw initial upper bound as authored
    pub initial_max: f64,
    pub min_track: Vec<Keyframe>,
    pub width_track: Vec<Keyframe>,
    pub interpolation: InterpolationMode,
}
