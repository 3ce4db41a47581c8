//! Semantic checks on parsed values
//!
//! The parser never fails, so a misspelled or malformed value silently
//! becomes something else. This layer looks at the input and the parse
//! outcome together and reports what an author probably did not intend.

use serde::Serialize;

use crate::models::{InterpolationMode, ValueKind};
use crate::parser::{parse_number, Format, ParseOutcome};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Type of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Something the lenient parser skipped or guessed
    ParseWarning,
    /// Non-empty input that produced the zero result
    ZeroResult,
    /// Word that looks like a misspelled interpolation keyword
    UnknownKeyword,
    /// Range with `min > max`
    InvertedRange,
    /// Keyframe times that go backwards
    NonMonotonicTimes,
    /// Keyframe time outside `[0, 1]`
    TimeOutOfRange,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::ParseWarning => write!(f, "parse_warning"),
            IssueType::ZeroResult => write!(f, "zero_result"),
            IssueType::UnknownKeyword => write!(f, "unknown_keyword"),
            IssueType::InvertedRange => write!(f, "inverted_range"),
            IssueType::NonMonotonicTimes => write!(f, "non_monotonic"),
            IssueType::TimeOutOfRange => write!(f, "time_out_of_range"),
        }
    }
}

/// A validation issue found in a value string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub issue_type: IssueType,
    pub message: String,
    /// Optional fix, e.g. the keyword a misspelling resembles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Where the value came from, e.g. `emitter/property`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ValidationIssue {
    pub fn error(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, issue_type, message: message.into(), suggestion: None, context: None }
    }

    pub fn warning(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, issue_type, message: message.into(), suggestion: None, context: None }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.severity, self.issue_type)?;
        if let Some(context) = &self.context {
            write!(f, " {}", context)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Collects issues across many values.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one value and record its issues under an optional context.
    pub fn validate_value(&mut self, context: Option<&str>, input: &str, outcome: &ParseOutcome) {
        let issues = validate_value(input, outcome);
        match context {
            Some(ctx) => self.issues.extend(issues.into_iter().map(|i| i.with_context(ctx))),
            None => self.issues.extend(issues),
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| matches!(i.severity, Severity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| matches!(i.severity, Severity::Warning))
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| matches!(i.severity, Severity::Error)).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| matches!(i.severity, Severity::Warning)).count()
    }
}

/// Check a parsed value against its source string.
///
/// Parser warnings are carried over as [`IssueType::ParseWarning`]. A
/// literal zero (`0`, `[0 0]`) is not an error; any other input that ends
/// up as the zero result is.
pub fn validate_value(input: &str, outcome: &ParseOutcome) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = outcome
        .warnings
        .iter()
        .map(|w| ValidationIssue::warning(IssueType::ParseWarning, w.message.clone()))
        .collect();

    for word in input.split_whitespace() {
        if parse_number(word).is_some() || word.contains([',', '[', ']']) {
            continue;
        }
        if InterpolationMode::from_keyword(word).is_some() {
            continue;
        }
        let issue = ValidationIssue::warning(IssueType::UnknownKeyword, format!("Unknown word '{}'", word));
        issues.push(match suggest_keyword(word) {
            Some(keyword) => issue.with_suggestion(keyword),
            None => issue,
        });
    }

    let result = &outcome.result;
    let literal_zero =
        matches!(outcome.format, Format::Fixed | Format::Range | Format::Empty) && outcome.warnings.is_empty();
    if result.is_zero() && !literal_zero {
        issues.push(ValidationIssue::error(
            IssueType::ZeroResult,
            format!("'{}' was not understood and evaluates to 0", input.trim()),
        ));
    }

    if matches!(result.kind(), ValueKind::Range | ValueKind::RangeWithKeyframes) && result.min > result.max {
        issues.push(ValidationIssue::warning(
            IssueType::InvertedRange,
            format!("Range [{} {}] has min above max; sampling always yields {}", result.min, result.max, result.min),
        ));
    }

    if !result.is_monotonic() {
        issues.push(ValidationIssue::warning(
            IssueType::NonMonotonicTimes,
            "Keyframe times decrease; evaluation uses the first matching interval",
        ));
    }

    if let Some(k) = result.keyframes.iter().find(|k| !(0.0..=1.0).contains(&k.time)) {
        issues.push(ValidationIssue::warning(
            IssueType::TimeOutOfRange,
            format!("Keyframe time {} is outside 0..1", k.time),
        ));
    }

    issues
}

/// Suggest the interpolation keyword closest to a misspelled word.
pub fn suggest_keyword(word: &str) -> Option<&'static str> {
    const MAX_DISTANCE: usize = 2;

    let lowered = word.to_ascii_lowercase();
    InterpolationMode::KEYWORDS
        .iter()
        .map(|mode| (mode.as_str(), levenshtein_distance(&lowered, &mode.as_str().to_ascii_lowercase())))
        .filter(|(_, distance)| *distance <= MAX_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(keyword, _)| keyword)
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
