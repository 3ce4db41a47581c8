//! Effect definition documents
//!
//! An effect document is JSON5 (comments, trailing commas and unquoted keys
//! allowed) listing emitters and their raw property value strings:
//!
//! ```text
//! {
//!   name: "spark",
//!   emitters: [
//!     { name: "core", properties: { SystemAlpha: "1,95 0", EmitterBoxX: "[-10 10] [0 40]" } },
//!   ],
//! }
//! ```
//!
//! Compiling a document parses every property. Emitter box properties take
//! the width reading of double ranges, everything else the random reading.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::EffectDefinition;
use crate::parser::{ParseOptions, ParseOutcome, ValueParser};
use crate::sampler::seeded;
use crate::validate::{ValidationIssue, Validator};

/// Properties whose double ranges describe a box width over time.
pub const WIDTH_PROPERTIES: &[&str] = &["EmitterBoxX", "EmitterBoxY"];

/// Error loading or compiling an effect document
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EffectError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {message}", .path.display())]
    Syntax { path: PathBuf, message: String },
    #[error("Invalid effect definition:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// One parsed property.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledProperty {
    pub source: String,
    #[serde(flatten)]
    pub outcome: ParseOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompiledEmitter {
    pub name: String,
    pub properties: BTreeMap<String, CompiledProperty>,
}

/// An effect with every property value parsed.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledEffect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub emitters: Vec<CompiledEmitter>,
}

impl CompiledEffect {
    pub fn property_count(&self) -> usize {
        self.emitters.iter().map(|e| e.properties.len()).sum()
    }

    /// Parser warnings of every property, prefixed `emitter/property`.
    pub fn warnings(&self) -> Vec<crate::models::Warning> {
        self.emitters
            .iter()
            .flat_map(|emitter| {
                emitter.properties.iter().flat_map(move |(key, property)| {
                    let context = format!("{}/{}", emitter.name, key);
                    property.outcome.warnings.iter().map(move |w| w.clone().in_context(&context))
                })
            })
            .collect()
    }

    /// Run the semantic checks over every property.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut validator = Validator::new();
        for emitter in &self.emitters {
            for (key, property) in &emitter.properties {
                let context = format!("{}/{}", emitter.name, key);
                validator.validate_value(Some(&context), &property.source, &property.outcome);
            }
        }
        validator.into_issues()
    }
}

/// Parse a JSON5 effect document.
pub fn parse_effect(source: &str, path: &Path) -> Result<EffectDefinition, EffectError> {
    json5::from_str(source).map_err(|e| EffectError::Syntax { path: path.to_path_buf(), message: e.to_string() })
}

/// Read and parse an effect document from disk.
pub fn load_effect(path: &Path) -> Result<EffectDefinition, EffectError> {
    let source = fs::read_to_string(path).map_err(|source| EffectError::Io { path: path.to_path_buf(), source })?;
    parse_effect(&source, path)
}

/// Structural problems that make a definition unusable.
pub fn check_definition(effect: &EffectDefinition) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (index, emitter) in effect.emitters.iter().enumerate() {
        if emitter.name.trim().is_empty() {
            errors.push(format!("emitters[{}].name must be a non-empty string", index));
        } else if !seen.insert(emitter.name.as_str()) {
            errors.push(format!("emitters[{}].name '{}' is used more than once", index, emitter.name));
        }
    }
    errors
}

/// Parse every property of an effect.
///
/// Random formats are resolved from a generator seeded with `seed`, so the
/// same document always compiles to the same values.
pub fn compile_effect(
    effect: &EffectDefinition,
    options: &ParseOptions,
    seed: Option<u64>,
) -> Result<CompiledEffect, EffectError> {
    let errors = check_definition(effect);
    if !errors.is_empty() {
        return Err(EffectError::Validation(errors));
    }

    let parser = ValueParser::new(*options);
    let mut rng = seeded(seed);

    let emitters = effect
        .emitters
        .iter()
        .map(|emitter| {
            let properties = emitter
                .properties
                .iter()
                .map(|(key, source)| {
                    let outcome = if WIDTH_PROPERTIES.contains(&key.as_str()) {
                        parser.parse_width_range(source, &mut rng)
                    } else {
                        parser.parse_random_double_range(source, &mut rng)
                    };
                    debug!(emitter = %emitter.name, property = %key, format = %outcome.format, "compiled property");
                    (key.clone(), CompiledProperty { source: source.clone(), outcome })
                })
                .collect();
            CompiledEmitter { name: emitter.name.clone(), properties }
        })
        .collect();

    Ok(CompiledEffect { name: effect.name.clone(), emitters })
}

/// Outcome of checking one effect file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub emitters: usize,
    pub properties: usize,
    pub issues: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// A file passes when it loaded and, in strict mode, has no issues at
    /// all; otherwise when it has no error-level issues.
    pub fn passed(&self, strict: bool) -> bool {
        if self.error.is_some() {
            return false;
        }
        if strict {
            self.issues.is_empty()
        } else {
            !self.issues.iter().any(|i| i.severity == crate::validate::Severity::Error)
        }
    }
}

/// Load, compile and validate one effect file.
pub fn check_file(path: &Path, options: &ParseOptions) -> FileReport {
    let compiled = load_effect(path).and_then(|effect| compile_effect(&effect, options, None));
    match compiled {
        Ok(effect) => FileReport {
            path: path.to_path_buf(),
            emitters: effect.emitters.len(),
            properties: effect.property_count(),
            issues: effect.validate(),
            error: None,
        },
        Err(e) => FileReport {
            path: path.to_path_buf(),
            emitters: 0,
            properties: 0,
            issues: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}

/// Check many effect files in parallel. Reports keep the input order.
pub fn check_files(paths: &[PathBuf], options: &ParseOptions) -> Vec<FileReport> {
    paths.par_iter().map(|path| check_file(path, options)).collect()
}
