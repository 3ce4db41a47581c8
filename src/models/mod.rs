//! Data models for parsed effect values and effect definitions

mod effect;
mod keyframe;
mod value;
mod warning;

// Re-export all public types
pub use effect::{EffectDefinition, EmitterDefinition};
pub use keyframe::{InterpolationMode, Keyframe};
pub use value::{ParseResult, RangeTracks, ValueKind};
pub use warning::Warning;
