//! Keyframe and interpolation-mode types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `(time, value)` sample point of an animated property.
///
/// `time` is a normalized fraction of the particle or emitter lifetime
/// (0.0 to 1.0). Times outside that range are kept as authored; they
/// describe an absolute timeline and are never clamped at parse time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
}

impl Keyframe {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Easing applied between two consecutive keyframes.
///
/// Serialized with the keyword spelling used in effect files; `Unspecified`
/// serializes as the empty string and evaluates exactly like `Linear`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    /// Constant speed
    Linear,
    /// Slow start, fast end (quadratic)
    EaseIn,
    /// Fast start, slow end (quadratic)
    EaseOut,
    /// Smoothstep S-curve
    FastInOutWeak,
    /// No keyword present in the source string
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl InterpolationMode {
    /// Keywords recognised inside value strings, in canonical spelling.
    pub const KEYWORDS: [InterpolationMode; 4] = [
        InterpolationMode::Linear,
        InterpolationMode::EaseIn,
        InterpolationMode::EaseOut,
        InterpolationMode::FastInOutWeak,
    ];

    /// Parse an interpolation keyword token (case-insensitive).
    ///
    /// Returns `None` for anything that is not one of the four keywords;
    /// the empty string is not a keyword.
    pub fn from_keyword(token: &str) -> Option<InterpolationMode> {
        Self::KEYWORDS.into_iter().find(|mode| mode.as_str().eq_ignore_ascii_case(token))
    }

    /// The keyword spelling, or `""` for `Unspecified`.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMode::Linear => "Linear",
            InterpolationMode::EaseIn => "EaseIn",
            InterpolationMode::EaseOut => "EaseOut",
            InterpolationMode::FastInOutWeak => "FastInOutWeak",
            InterpolationMode::Unspecified => "",
        }
    }

    pub fn is_specified(&self) -> bool {
        *self != InterpolationMode::Unspecified
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword_canonical() {
        assert_eq!(InterpolationMode::from_keyword("Linear"), Some(InterpolationMode::Linear));
        assert_eq!(InterpolationMode::from_keyword("EaseIn"), Some(InterpolationMode::EaseIn));
        assert_eq!(InterpolationMode::from_keyword("EaseOut"), Some(InterpolationMode::EaseOut));
        assert_eq!(
            InterpolationMode::from_keyword("FastInOutWeak"),
            Some(InterpolationMode::FastInOutWeak)
        );
    }

    #[test]
    fn test_from_keyword_case_insensitive() {
        assert_eq!(InterpolationMode::from_keyword("linear"), Some(InterpolationMode::Linear));
        assert_eq!(InterpolationMode::from_keyword("EASEOUT"), Some(InterpolationMode::EaseOut));
    }

    #[test]
    fn test_from_keyword_rejects_other_words() {
        assert_eq!(InterpolationMode::from_keyword(""), None);
        assert_eq!(InterpolationMode::from_keyword("Bounce"), None);
        assert_eq!(InterpolationMode::from_keyword("0.5"), None);
    }

    #[test]
    fn test_serialization_uses_keyword_spelling() {
        let json = serde_json::to_string(&InterpolationMode::FastInOutWeak).unwrap();
        assert_eq!(json, "\"FastInOutWeak\"");

        let json = serde_json::to_string(&InterpolationMode::Unspecified).unwrap();
        assert_eq!(json, "\"\"");

        let mode: InterpolationMode = serde_json::from_str("\"\"").unwrap();
        assert_eq!(mode, InterpolationMode::Unspecified);
    }

    #[test]
    fn test_default_is_unspecified() {
        assert_eq!(InterpolationMode::default(), InterpolationMode::Unspecified);
        assert!(!InterpolationMode::default().is_specified());
        assert_eq!(InterpolationMode::Unspecified.to_string(), "");
    }
}
