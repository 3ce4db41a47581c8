//! Advisory warnings collected during lenient parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A warning generated while parsing or validating a value string.
///
/// Warnings never change a parse result; they only explain what the
/// lenient parser skipped or guessed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Prefix the message with a location such as `emitter/property`.
    pub fn in_context(self, context: &str) -> Self {
        Self { message: format!("{}: {}", context, self.message) }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
