//! Keyframe evaluation and the two resolution entry points
//!
//! Downstream emitter code consumes a [`ParseResult`] in one of two ways:
//!
//! 1. **Resolve as range** ([`ParseResult::resolve_range`]): draw one value
//!    when a particle spawns.
//! 2. **Resolve as curve** ([`ParseResult::to_curve`]): build a [`Curve`]
//!    once per particle and sample it every frame with [`Curve::value_at`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::curve::{ease, lerp};
use crate::models::{InterpolationMode, Keyframe, ParseResult, ValueKind};
use crate::sampler::sample;

/// Sample a keyframe sequence at time `t`.
///
/// - No keyframes: `0.0`
/// - One keyframe: its value for any `t`
/// - `t` before the first keyframe: the first value
/// - `t` at or after the last keyframe: the last value
/// - Otherwise the bracketing pair is found by a linear scan and blended
///   with the eased ratio. A zero-length interval yields its first value.
///
/// The keyframes are only read. Times are expected to be non-decreasing;
/// if no interval brackets `t` the last value is returned.
pub fn evaluate(keyframes: &[Keyframe], t: f64, mode: InterpolationMode) -> f64 {
    let (first, last) = match (keyframes.first(), keyframes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };

    if keyframes.len() == 1 || t < first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }

    for pair in keyframes.windows(2) {
        let (k0, k1) = (&pair[0], &pair[1]);
        if t >= k0.time && t <= k1.time {
            let span = k1.time - k0.time;
            if span <= 0.0 {
                return k0.value;
            }
            let ratio = (t - k0.time) / span;
            return lerp(k0.value, k1.value, ease(ratio, mode));
        }
    }

    last.value
}

/// A resolved animation curve for one particle instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Curve {
    pub keyframes: Vec<Keyframe>,
    pub interpolation: InterpolationMode,
}

impl Curve {
    /// A curve that holds one value forever.
    pub fn constant(value: f64) -> Self {
        Self { keyframes: vec![Keyframe::new(0.0, value)], interpolation: InterpolationMode::Linear }
    }

    pub fn value_at(&self, t: f64) -> f64 {
        evaluate(&self.keyframes, t, self.interpolation)
    }

    /// Sample the curve at `steps + 1` evenly spaced times across `[0, 1]`.
    pub fn sample_points(&self, steps: usize) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                (t, self.value_at(t))
            })
            .collect()
    }
}

impl ParseResult {
    /// Evaluate the keyframe sequence with the stored interpolation mode.
    pub fn evaluate(&self, t: f64) -> f64 {
        evaluate(&self.keyframes, t, self.interpolation)
    }

    /// Resolve as a single spawn-time value.
    ///
    /// Ranges are sampled uniformly; keyframe sequences yield their value at
    /// `t = 0`.
    pub fn resolve_range<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.kind() {
            ValueKind::Fixed | ValueKind::Range | ValueKind::RangeWithKeyframes => {
                sample(rng, self.min, self.max)
            }
            ValueKind::Keyframes => self.evaluate(0.0),
        }
    }

    /// Resolve as a per-frame curve.
    ///
    /// For the range+keyframe form the range supplies the starting value: a
    /// sampled keyframe at `t = 0` is prepended unless the authored keyframes
    /// already start there.
    pub fn to_curve<R: Rng + ?Sized>(&self, rng: &mut R) -> Curve {
        match self.kind() {
            ValueKind::Fixed | ValueKind::Range => Curve::constant(sample(rng, self.min, self.max)),
            ValueKind::Keyframes => {
                Curve { keyframes: self.keyframes.clone(), interpolation: self.interpolation }
            }
            ValueKind::RangeWithKeyframes => {
                let initial = sample(rng, self.min, self.max);
                let mut keyframes = Vec::with_capacity(self.keyframes.len() + 1);
                if self.keyframes.first().map_or(true, |k| k.time > 0.0) {
                    keyframes.push(Keyframe::new(0.0, initial));
                }
                keyframes.extend_from_slice(&self.keyframes);
                Curve { keyframes, interpolation: self.interpolation }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::seeded;
    use rand::rngs::mock::StepRng;

    fn ramp() -> Vec<Keyframe> {
        vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 100.0)]
    }

    #[test]
    fn test_linear_ramp() {
        let k = ramp();
        assert_eq!(evaluate(&k, 0.0, InterpolationMode::Linear), 0.0);
        assert_eq!(evaluate(&k, 0.25, InterpolationMode::Linear), 25.0);
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::Linear), 50.0);
        assert_eq!(evaluate(&k, 1.0, InterpolationMode::Linear), 100.0);
    }

    #[test]
    fn test_eased_ramp() {
        let k = ramp();
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::EaseIn), 25.0);
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::EaseOut), 75.0);
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::FastInOutWeak), 50.0);
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::Unspecified), 50.0);
    }

    #[test]
    fn test_clamping() {
        let k = ramp();
        assert_eq!(evaluate(&k, -0.5, InterpolationMode::Linear), 0.0);
        assert_eq!(evaluate(&k, 1.5, InterpolationMode::Linear), 100.0);
    }

    #[test]
    fn test_single_and_empty() {
        let single = [Keyframe::new(0.0, 42.0)];
        for t in [-1.0, 0.0, 0.3, 1.0, 7.0] {
            assert_eq!(evaluate(&single, t, InterpolationMode::EaseIn), 42.0);
        }
        assert_eq!(evaluate(&[], 0.5, InterpolationMode::Linear), 0.0);
    }

    #[test]
    fn test_multi_segment() {
        // Hold-then-decay: 1 until 0.95, then down to 0
        let k = [Keyframe::new(0.0, 1.0), Keyframe::new(0.95, 1.0), Keyframe::new(1.0, 0.0)];
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::Linear), 1.0);
        assert!((evaluate(&k, 0.975, InterpolationMode::Linear) - 0.5).abs() < 1e-9);
        assert_eq!(evaluate(&k, 1.0, InterpolationMode::Linear), 0.0);
    }

    #[test]
    fn test_zero_length_interval_returns_first_value() {
        // Trigger-style discontinuity at 0.5
        let k = [Keyframe::new(0.0, 1.0), Keyframe::new(0.5, 2.0), Keyframe::new(0.5, 8.0), Keyframe::new(1.0, 8.0)];
        assert_eq!(evaluate(&k, 0.5, InterpolationMode::Linear), 2.0);
        assert_eq!(evaluate(&k, 0.75, InterpolationMode::Linear), 8.0);
    }

    #[test]
    fn test_absolute_times_preserved() {
        let k = [Keyframe::new(0.0, 2.0), Keyframe::new(1.0, 2.0), Keyframe::new(4.0, 21.0)];
        assert_eq!(evaluate(&k, 2.5, InterpolationMode::Linear), 11.5);
        assert_eq!(evaluate(&k, 10.0, InterpolationMode::Linear), 21.0);
    }

    #[test]
    fn test_non_monotonic_does_not_panic() {
        let k = [Keyframe::new(0.0, 1.0), Keyframe::new(0.8, 2.0), Keyframe::new(0.2, 3.0), Keyframe::new(0.9, 4.0)];
        let v = evaluate(&k, 0.85, InterpolationMode::Linear);
        assert!(v.is_finite());
    }

    #[test]
    fn test_evaluator_does_not_mutate_input() {
        let k = ramp();
        let before = k.clone();
        let _ = evaluate(&k, 0.3, InterpolationMode::EaseOut);
        assert_eq!(k, before);
    }

    #[test]
    fn test_resolve_range_samples_within_bounds() {
        let mut rng = seeded(Some(3));
        let range = ParseResult::range(0.7, 0.9);
        for _ in 0..100 {
            let v = range.resolve_range(&mut rng);
            assert!((0.7..=0.9).contains(&v));
        }
        assert_eq!(ParseResult::fixed(1500.0).resolve_range(&mut rng), 1500.0);
    }

    #[test]
    fn test_resolve_range_of_sequence_uses_start() {
        let mut rng = seeded(None);
        let seq = ParseResult::sequence(ramp(), InterpolationMode::Linear);
        assert_eq!(seq.resolve_range(&mut rng), 0.0);
    }

    #[test]
    fn test_to_curve_fixed_is_constant() {
        let mut rng = seeded(None);
        let curve = ParseResult::fixed(3.0).to_curve(&mut rng);
        assert_eq!(curve.value_at(0.0), 3.0);
        assert_eq!(curve.value_at(0.9), 3.0);
    }

    #[test]
    fn test_to_curve_hybrid_prepends_sampled_start() {
        let mut rng = StepRng::new(0, 0);
        let hybrid = ParseResult::range_with_keyframes(
            -720.0,
            720.0,
            vec![Keyframe::new(0.4, 0.0)],
            InterpolationMode::Unspecified,
        );
        let curve = hybrid.to_curve(&mut rng);
        assert_eq!(curve.keyframes.len(), 2);
        assert_eq!(curve.keyframes[0], Keyframe::new(0.0, -720.0));
        assert_eq!(curve.value_at(0.2), -360.0);
        assert_eq!(curve.value_at(0.9), 0.0);
    }

    #[test]
    fn test_to_curve_hybrid_keeps_authored_start() {
        let mut rng = StepRng::new(0, 0);
        let hybrid = ParseResult::range_with_keyframes(
            1.0,
            2.0,
            vec![Keyframe::new(0.0, 5.0), Keyframe::new(1.0, 0.0)],
            InterpolationMode::Unspecified,
        );
        let curve = hybrid.to_curve(&mut rng);
        assert_eq!(curve.keyframes, hybrid.keyframes);
    }

    #[test]
    fn test_zero_width_hybrid_starts_from_range() {
        let mut rng = StepRng::new(0, 0);
        let hybrid = crate::parser::parse_value("[0 0] 5,50", &mut rng);
        assert_eq!(hybrid.resolve_range(&mut rng), 0.0);

        let curve = hybrid.to_curve(&mut rng);
        assert_eq!(curve.keyframes, vec![Keyframe::new(0.0, 0.0), Keyframe::new(0.5, 5.0)]);
        assert_eq!(curve.value_at(0.0), 0.0);
        assert_eq!(curve.value_at(0.25), 2.5);
    }

    #[test]
    fn test_sample_points() {
        let curve = Curve { keyframes: ramp(), interpolation: InterpolationMode::Linear };
        let points = curve.sample_points(4);
        assert_eq!(points.len(), 5);
        assert_eq!(points[2], (0.5, 50.0));
        assert_eq!(points[4], (1.0, 100.0));
    }
}
