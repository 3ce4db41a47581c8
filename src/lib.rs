//! popfx - Particle effect value strings
//!
//! This library provides functionality to:
//! - Parse the compact value strings of legacy particle effect files
//!   (`"1500"`, `"[0.7 0.9]"`, `"1,95 0"`, `"[-720 720] 0,40"`, ...) into a
//!   normalized [`ParseResult`]
//! - Evaluate keyframe sequences with eased interpolation
//! - Resolve values as spawn-time samples or per-particle curves from an
//!   injected random source
//! - Compile and check whole effect definition documents
//!
//! ```
//! use popfx::{parse_value, sampler::seeded};
//!
//! let mut rng = seeded(Some(1));
//! let alpha = parse_value("1,95 0", &mut rng);
//! assert_eq!(alpha.evaluate(0.0), 1.0);
//! assert_eq!(alpha.evaluate(1.0), 0.0);
//! ```

pub mod cli;
pub mod config;
pub mod curve;
pub mod effect;
pub mod evaluator;
pub mod fmt;
pub mod models;
pub mod parser;
pub mod sampler;
pub mod tokenizer;
pub mod validate;

pub use evaluator::{evaluate, Curve};
pub use models::{InterpolationMode, Keyframe, ParseResult, RangeTracks, ValueKind, Warning};
pub use parser::{
    parse_random_double_range, parse_range_value, parse_value, parse_value_with, parse_width_range,
    HeuristicProfile, ParseOptions, ParseOutcome, ValueParser,
};
pub use sampler::sample;
