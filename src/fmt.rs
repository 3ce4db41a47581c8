//! Canonical text form of parsed values
//!
//! Writes a [`ParseResult`] back as a value string the parser reads to an
//! equivalent result:
//! - Fixed values as a bare number (`1500`)
//! - Ranges as a bracket group (`[0.7 0.9]`)
//! - Keyframe sequences as `time,value` pairs, prefixed by the interpolation
//!   keyword when one is set (`Linear 0,0.4 0.1,10`)
//! - Range+keyframe values as the range followed by `value,percent` pairs
//!   (`[-720 720] 0,40`)
//!
//! Two consecutive keyframes with the same value above the trigger threshold
//! read back as a trigger pattern. No spelling of a plain sequence avoids
//! that rule, so such sequences do not round-trip.

use std::fmt;

use crate::models::{InterpolationMode, ParseResult, ValueKind};

/// Times at or below this are written as fractions in hybrid values, larger
/// ones as percentages.
const PERCENT_CUTOFF: f64 = 0.01;

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::Fixed => write!(f, "{}", self.min),
            ValueKind::Range => write!(f, "[{} {}]", self.min, self.max),
            ValueKind::Keyframes => {
                write_keyword(f, self.interpolation)?;
                for (i, k) in self.keyframes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{},{}", k.time, k.value)?;
                }
                Ok(())
            }
            ValueKind::RangeWithKeyframes => {
                write!(f, "[{} {}]", self.min, self.max)?;
                for k in &self.keyframes {
                    write!(f, " {},{}", k.value, percent_of(k.time))?;
                }
                Ok(())
            }
        }
    }
}

fn write_keyword(f: &mut fmt::Formatter<'_>, mode: InterpolationMode) -> fmt::Result {
    if mode.is_specified() {
        write!(f, "{} ", mode)
    } else {
        Ok(())
    }
}

fn percent_of(time: f64) -> f64 {
    if time > PERCENT_CUTOFF {
        time * 100.0
    } else {
        time
    }
}

/// Reformat a value string into its canonical spelling.
///
/// Random formats (double ranges, random targets) are resolved with `rng`
/// first, so only their sampled form is written.
pub fn format_value<R: rand::Rng + ?Sized>(input: &str, rng: &mut R) -> String {
    crate::parser::parse_value(input, rng).to_string()
}
