//! Interpolation curves for keyframe animation
//!
//! Each curve maps a progress ratio in `[0, 1]` to an eased ratio in
//! `[0, 1]`. The formulas reproduce the legacy effect player exactly:
//!
//! - `Linear`: `r`
//! - `EaseIn`: `r²`
//! - `EaseOut`: `1 - (1 - r)²`
//! - `FastInOutWeak`: `r² · (3 - 2r)` (smoothstep)
//!
//! `Unspecified` falls back to linear.

use crate::models::InterpolationMode;

/// Apply easing to a progress ratio.
///
/// The ratio is clamped to `[0, 1]` first, so callers may pass slightly
/// out-of-range values produced by floating-point division.
pub fn ease(ratio: f64, mode: InterpolationMode) -> f64 {
    let r = ratio.clamp(0.0, 1.0);

    match mode {
        InterpolationMode::Linear | InterpolationMode::Unspecified => r,
        InterpolationMode::EaseIn => r * r,
        InterpolationMode::EaseOut => 1.0 - (1.0 - r) * (1.0 - r),
        InterpolationMode::FastInOutWeak => r * r * (3.0 - 2.0 * r),
    }
}

/// Linear blend between `from` and `to`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
