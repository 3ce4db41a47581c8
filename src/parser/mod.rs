//! Effect value parsing
//!
//! Decodes the compact value strings of legacy particle effect files into a
//! normalized [`ParseResult`]. The format has no single grammar: the same
//! few token kinds are reused across several sub-formats, so the
//! dispatcher tries them in decreasing order of specificity:
//!
//! 1. `[min max] v,p ...` - range with trailing keyframes
//! 2. `[a b] [c d]` - double range
//! 3. `v [min max]` - initial value to random target
//! 4. `[min max]` or `[v]` - plain range
//! 5. interpolation keyword or any comma - keyframe sequence
//! 6. `v1 v2` - implicit linear pair from 0 to 1
//! 7. `v` - fixed value
//! 8. anything else - the zero result
//!
//! Parsing is fail-soft: malformed input never errors. Everything the
//! parser skipped or guessed is reported in [`ParseOutcome::warnings`].

mod double_range;
mod hybrid;
mod options;
mod range;
mod scalar;
mod sequence;

use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::models::{InterpolationMode, Keyframe, ParseResult, RangeTracks, Warning};
use crate::sampler::sample;
use crate::tokenizer::{tokenize, Token};

pub use double_range::RangePair;
pub use options::{HeuristicProfile, Heuristics, ParseOptions};
pub use range::parse_range_group;
pub use scalar::{parse_number, parse_pair};

/// The sub-format a value string was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    RangeWithKeyframes,
    DoubleRange,
    InitialToRandomTarget,
    Range,
    KeyframeSequence,
    ImplicitPair,
    Fixed,
    #[default]
    Empty,
    Unrecognized,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::RangeWithKeyframes => "range-with-keyframes",
            Format::DoubleRange => "double-range",
            Format::InitialToRandomTarget => "initial-to-random-target",
            Format::Range => "range",
            Format::KeyframeSequence => "keyframe-sequence",
            Format::ImplicitPair => "implicit-pair",
            Format::Fixed => "fixed",
            Format::Empty => "empty",
            Format::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing with diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub result: ParseResult,
    pub format: Format,
    pub warnings: Vec<Warning>,
}

/// Decide which sub-parser owns a token stream.
pub fn classify(tokens: &[Token<'_>]) -> Format {
    let is_number = |w: &str| parse_number(w).is_some();
    let is_pair_word = |t: &Token<'_>| t.as_word().is_some_and(|w| w.contains(','));

    match tokens {
        [] => Format::Empty,
        [Token::Group(_), rest @ ..]
            if !rest.is_empty() && rest.iter().all(Token::is_word) && rest.iter().any(is_pair_word) =>
        {
            Format::RangeWithKeyframes
        }
        [Token::Group(_), Token::Group(_)] => Format::DoubleRange,
        [Token::Word(w), Token::Group(_)] if is_number(*w) => Format::InitialToRandomTarget,
        [Token::Group(_)] => Format::Range,
        _ if tokens.iter().any(|t| {
            is_pair_word(t) || t.as_word().is_some_and(|w| InterpolationMode::from_keyword(w).is_some())
        }) =>
        {
            Format::KeyframeSequence
        }
        [Token::Word(a), Token::Word(b)] if is_number(*a) && is_number(*b) => Format::ImplicitPair,
        [Token::Word(w)] if is_number(*w) => Format::Fixed,
        _ => Format::Unrecognized,
    }
}

/// Remove interpolation keywords from a token stream.
///
/// The first keyword wins; later keywords are dropped with a warning.
fn extract_keyword<'a>(
    tokens: &[Token<'a>],
    warnings: &mut Vec<Warning>,
) -> (Vec<Token<'a>>, InterpolationMode) {
    let mut mode = InterpolationMode::Unspecified;
    let mut kept = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.as_word().and_then(InterpolationMode::from_keyword) {
            Some(found) if mode.is_specified() => {
                if found != mode {
                    warnings.push(Warning::new(format!(
                        "Ignoring interpolation '{}', already using '{}'",
                        found, mode
                    )));
                }
            }
            Some(found) => mode = found,
            None => kept.push(*token),
        }
    }

    (kept, mode)
}

/// Parses value strings with a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueParser {
    options: ParseOptions,
}

impl ValueParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a value string through the format dispatcher.
    ///
    /// Double ranges take the random-interpolated reading.
    pub fn parse<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> ParseOutcome {
        self.dispatch(input, rng, DoubleRangeReading::Random)
    }

    /// Parse with the random-interpolated double-range reading:
    /// `[a b] [c d]` becomes `{0, sample(a..b)}` to `{1, sample(c..d)}`.
    pub fn parse_random_double_range<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> ParseOutcome {
        self.dispatch(input, rng, DoubleRangeReading::Random)
    }

    /// Parse with the width-interpolated double-range reading used by
    /// emitter boxes: `[a b] [c d]` becomes `{0, |b-a|}` to `{1, |d-c|}`.
    ///
    /// Other formats parse exactly as [`ValueParser::parse`].
    pub fn parse_width_range<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> ParseOutcome {
        self.dispatch(input, rng, DoubleRangeReading::Width)
    }

    /// Parse into separate lower-bound and width tracks.
    ///
    /// No randomness is involved: random targets become a widening box
    /// rather than a sample.
    pub fn parse_range_value(&self, input: &str) -> (RangeTracks, Vec<Warning>) {
        let (tokens, mut warnings) = tokenize(input.trim());
        let format = classify(&tokens);
        debug!(input = input.trim(), %format, "range value");

        let tracks = match (format, tokens.as_slice()) {
            (Format::DoubleRange, [Token::Group(first), Token::Group(second)]) => {
                double_range::parse_groups(first, second, &mut warnings)
                    .map(double_range::range_tracks)
                    .unwrap_or_default()
            }
            (Format::Range, [Token::Group(group)]) => range::expect_range_group(group, &mut warnings)
                .map(|(min, max)| box_tracks(min, max))
                .unwrap_or_default(),
            (Format::InitialToRandomTarget, [Token::Word(word), Token::Group(group)]) => {
                match (parse_number(word), range::expect_range_group(group, &mut warnings)) {
                    (Some(initial), Some((min, max))) => RangeTracks {
                        initial_min: initial,
                        initial_max: initial,
                        min_track: vec![Keyframe::new(0.0, initial), Keyframe::new(1.0, min)],
                        width_track: vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, (max - min).abs())],
                        interpolation: InterpolationMode::Linear,
                    },
                    _ => RangeTracks::default(),
                }
            }
            (Format::RangeWithKeyframes, [Token::Group(group), rest @ ..]) => {
                let words: Vec<&str> = rest.iter().filter_map(Token::as_word).collect();
                let result = hybrid::parse_hybrid(group, &words, &self.options.heuristics, &mut warnings);
                converging_tracks(&result)
            }
            _ => {
                let result = self.dispatch_tokens(&tokens, format, &mut warnings, &mut NoRandom);
                match result.keyframes.first() {
                    Some(first) => RangeTracks {
                        initial_min: first.value,
                        initial_max: first.value,
                        min_track: result.keyframes.clone(),
                        width_track: vec![Keyframe::new(0.0, 0.0)],
                        interpolation: result.interpolation,
                    },
                    None => box_tracks(result.min, result.max),
                }
            }
        };

        (tracks, warnings)
    }

    fn dispatch<R: Rng + ?Sized>(&self, input: &str, rng: &mut R, reading: DoubleRangeReading) -> ParseOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ParseOutcome::default();
        }

        let (tokens, mut warnings) = tokenize(trimmed);
        let format = classify(&tokens);
        debug!(input = trimmed, %format, "classified value");

        let result = match (format, tokens.as_slice()) {
            (Format::DoubleRange, [Token::Group(first), Token::Group(second)]) => {
                match double_range::parse_groups(first, second, &mut warnings) {
                    Some(ranges) => match reading {
                        DoubleRangeReading::Random => double_range::random_interpolated(ranges, rng),
                        DoubleRangeReading::Width => double_range::width_interpolated(ranges),
                    },
                    None => ParseResult::zero(),
                }
            }
            _ => self.dispatch_tokens(&tokens, format, &mut warnings, rng),
        };

        ParseOutcome { result, format, warnings }
    }

    fn dispatch_tokens<R: Rng + ?Sized>(
        &self,
        tokens: &[Token<'_>],
        format: Format,
        warnings: &mut Vec<Warning>,
        rng: &mut R,
    ) -> ParseResult {
        match (format, tokens) {
            (Format::RangeWithKeyframes, [Token::Group(group), rest @ ..]) => {
                let words: Vec<&str> = rest.iter().filter_map(Token::as_word).collect();
                hybrid::parse_hybrid(group, &words, &self.options.heuristics, warnings)
            }
            (Format::DoubleRange, [Token::Group(first), Token::Group(second)]) => {
                double_range::parse_groups(first, second, warnings)
                    .map(|ranges| double_range::random_interpolated(ranges, rng))
                    .unwrap_or_default()
            }
            (Format::InitialToRandomTarget, [Token::Word(word), Token::Group(group)]) => {
                match (parse_number(word), range::expect_range_group(group, warnings)) {
                    (Some(initial), Some((min, max))) => ParseResult::sequence(
                        vec![Keyframe::new(0.0, initial), Keyframe::new(1.0, sample(rng, min, max))],
                        InterpolationMode::Linear,
                    ),
                    _ => ParseResult::zero(),
                }
            }
            (Format::Range, [Token::Group(group)]) => range::parse_range(group, warnings),
            (Format::KeyframeSequence, _) => {
                let (stripped, mode) = extract_keyword(tokens, warnings);
                let mut words = Vec::with_capacity(stripped.len());
                for token in &stripped {
                    match token {
                        Token::Word(word) => words.push(*word),
                        Token::Group(group) => {
                            warnings.push(Warning::new(format!("Ignoring range '[{}]' in keyframe sequence", group)))
                        }
                        Token::Malformed(_) => {}
                    }
                }
                sequence::parse_sequence(&words, mode, &self.options, warnings)
                    .unwrap_or_else(|| scalar::parse_fixed(&stripped, warnings))
            }
            (Format::ImplicitPair, [Token::Word(a), Token::Word(b)]) => {
                match (parse_number(a), parse_number(b)) {
                    (Some(start), Some(end)) => ParseResult::sequence(
                        vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)],
                        InterpolationMode::Linear,
                    ),
                    _ => ParseResult::zero(),
                }
            }
            (Format::Fixed, _) => scalar::parse_fixed(tokens, warnings),
            (Format::Empty, _) => ParseResult::zero(),
            _ => {
                warnings.push(Warning::new("Unrecognised value format, using 0"));
                ParseResult::zero()
            }
        }
    }
}

/// Which meaning `[a b] [c d]` carries for the calling property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DoubleRangeReading {
    Random,
    Width,
}

/// A random source for paths that never draw. Always yields zero.
struct NoRandom;

impl rand::RngCore for NoRandom {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

/// Static box: lower bound `min`, constant width.
fn box_tracks(min: f64, max: f64) -> RangeTracks {
    RangeTracks {
        initial_min: min,
        initial_max: max,
        min_track: vec![Keyframe::new(0.0, min)],
        width_track: vec![Keyframe::new(0.0, (max - min).abs())],
        interpolation: InterpolationMode::Unspecified,
    }
}

/// Box that starts as the range and narrows onto the keyframe values.
fn converging_tracks(result: &ParseResult) -> RangeTracks {
    let mut tracks = box_tracks(result.min, result.max);
    tracks.interpolation = result.interpolation;
    if let Some(first) = result.keyframes.first() {
        tracks.min_track.extend_from_slice(&result.keyframes);
        tracks.width_track.push(Keyframe::new(first.time, 0.0));
    }
    tracks
}

/// Parse a value string with default options.
///
/// ```
/// use popfx::parser::parse_value;
/// use popfx::sampler::seeded;
///
/// let mut rng = seeded(None);
/// let result = parse_value("[0.7 0.9]", &mut rng);
/// assert_eq!((result.min, result.max), (0.7, 0.9));
/// ```
pub fn parse_value<R: Rng + ?Sized>(input: &str, rng: &mut R) -> ParseResult {
    ValueParser::default().parse(input, rng).result
}

/// Parse a value string, keeping the format and warnings.
pub fn parse_value_with<R: Rng + ?Sized>(input: &str, options: &ParseOptions, rng: &mut R) -> ParseOutcome {
    ValueParser::new(*options).parse(input, rng)
}

/// Random-interpolated double-range entry point with default options.
pub fn parse_random_double_range<R: Rng + ?Sized>(input: &str, rng: &mut R) -> ParseResult {
    ValueParser::default().parse_random_double_range(input, rng).result
}

/// Width-interpolated double-range entry point with default options.
pub fn parse_width_range<R: Rng + ?Sized>(input: &str, rng: &mut R) -> ParseResult {
    ValueParser::default().parse_width_range(input, rng).result
}

/// Range-value entry point with default options.
pub fn parse_range_value(input: &str) -> RangeTracks {
    ValueParser::default().parse_range_value(input).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::seeded;
    use rand::rngs::mock::StepRng;

    fn parse(input: &str) -> ParseOutcome {
        ValueParser::default().parse(input, &mut seeded(None))
    }

    fn format_of(input: &str) -> Format {
        classify(&tokenize(input).0)
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(format_of("[-720 720] 0,39.999996"), Format::RangeWithKeyframes);
        assert_eq!(format_of("[.4 .6] [.8 1.2]"), Format::DoubleRange);
        assert_eq!(format_of("0 [-40 10]"), Format::InitialToRandomTarget);
        assert_eq!(format_of("[0.7 0.9]"), Format::Range);
        assert_eq!(format_of("[5]"), Format::Range);
        assert_eq!(format_of("0,2 1,2 4,21"), Format::KeyframeSequence);
        assert_eq!(format_of(".4 Linear 10,9.999999"), Format::KeyframeSequence);
        assert_eq!(format_of("EaseIn 3"), Format::KeyframeSequence);
        assert_eq!(format_of("200 100"), Format::ImplicitPair);
        assert_eq!(format_of("1500"), Format::Fixed);
        assert_eq!(format_of(""), Format::Empty);
        assert_eq!(format_of("hello"), Format::Unrecognized);
        assert_eq!(format_of("1 2 3"), Format::Unrecognized);
    }

    #[test]
    fn test_range_without_pairs_is_not_hybrid() {
        // Trailing scalar only: no keyframe tokens, falls through
        assert_eq!(format_of("[1 2] 3"), Format::Unrecognized);
        // Three groups are not a double range
        assert_eq!(format_of("[1] [2] [3]"), Format::Unrecognized);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(parse("").result.is_zero());
        assert!(parse("   ").result.is_zero());
        assert!(parse("").warnings.is_empty());
    }

    #[test]
    fn test_fixed_values() {
        assert_eq!(parse("1500").result, ParseResult::fixed(1500.0));
        assert_eq!(parse("-10.5").result, ParseResult::fixed(-10.5));
        assert_eq!(parse("  7  ").result, ParseResult::fixed(7.0));
    }

    #[test]
    fn test_plain_ranges() {
        assert_eq!(parse("[0.7 0.9]").result, ParseResult::range(0.7, 0.9));
        assert_eq!(parse("[5]").result, ParseResult::fixed(5.0));
        assert_eq!(parse("[9 3]").result, ParseResult::range(9.0, 3.0));
    }

    #[test]
    fn test_implicit_pair() {
        let result = parse("200 100").result;
        assert_eq!(result.keyframes, vec![Keyframe::new(0.0, 200.0), Keyframe::new(1.0, 100.0)]);
        assert_eq!(result.interpolation, InterpolationMode::Linear);
    }

    #[test]
    fn test_keyword_sequence() {
        let outcome = parse(".4 Linear 10,9.999999");
        assert_eq!(outcome.format, Format::KeyframeSequence);
        assert_eq!(outcome.result.interpolation, InterpolationMode::Linear);
        assert_eq!(outcome.result.keyframes.len(), 2);
    }

    #[test]
    fn test_keyword_alone_falls_back_to_zero() {
        let outcome = parse("Linear");
        assert!(outcome.result.is_zero());
        assert!(!outcome.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_keywords_warn() {
        let outcome = parse("EaseIn 0,1 EaseOut 1,2");
        assert_eq!(outcome.result.interpolation, InterpolationMode::EaseIn);
        assert_eq!(outcome.result.keyframes.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_initial_to_random_target() {
        let mut rng = StepRng::new(0, 0);
        let result = ValueParser::default().parse("0 [-40 10]", &mut rng).result;
        assert_eq!(result.keyframes, vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, -40.0)]);
        assert_eq!(result.interpolation, InterpolationMode::Linear);
    }

    #[test]
    fn test_double_range_readings() {
        let parser = ValueParser::default();
        let mut rng = StepRng::new(0, 0);

        let random = parser.parse_random_double_range("[.4 .6] [.8 1.2]", &mut rng).result;
        assert_eq!(random.keyframes, vec![Keyframe::new(0.0, 0.4), Keyframe::new(1.0, 0.8)]);

        let width = parser.parse_width_range("[-10 10] [0 5]", &mut rng).result;
        assert_eq!(width.keyframes, vec![Keyframe::new(0.0, 20.0), Keyframe::new(1.0, 5.0)]);
        assert_eq!(width.interpolation, InterpolationMode::Linear);
    }

    #[test]
    fn test_width_reading_leaves_other_formats_alone() {
        let mut rng = seeded(None);
        assert_eq!(parse_width_range("[1 3]", &mut rng), ParseResult::range(1.0, 3.0));
        assert_eq!(parse_width_range("12", &mut rng), ParseResult::fixed(12.0));
    }

    #[test]
    fn test_malformed_double_range_is_zero() {
        let outcome = parse("[a b] [1 2]");
        assert!(outcome.result.is_zero());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_unclosed_bracket_is_zero() {
        let outcome = parse("[0.7 0.9");
        assert!(outcome.result.is_zero());
        assert_eq!(outcome.format, Format::Unrecognized);
        assert!(outcome.warnings.iter().any(|w| w.message.contains("Unclosed")));
    }

    #[test]
    fn test_hybrid_through_dispatcher() {
        let result = parse("[-720 720] 0,39.999996").result;
        assert_eq!((result.min, result.max), (-720.0, 720.0));
        assert_eq!(result.keyframes.len(), 1);
        assert_eq!(result.interpolation, InterpolationMode::Unspecified);
    }

    #[test]
    fn test_profile_changes_hold_reading() {
        let options = ParseOptions::default().with_profile(HeuristicProfile::ExplicitHold);
        let result = parse_value_with("1,95 0", &options, &mut seeded(None)).result;
        assert_eq!(result.keyframes.len(), 3);
        assert_eq!(parse("1,95 0").result.keyframes.len(), 2);
    }

    #[test]
    fn test_range_value_double() {
        let tracks = parse_range_value("[-10 10] [0 40]");
        assert_eq!((tracks.initial_min, tracks.initial_max), (-10.0, 10.0));
        assert_eq!(tracks.min_track, vec![Keyframe::new(0.0, -10.0), Keyframe::new(1.0, 0.0)]);
        assert_eq!(tracks.width_track, vec![Keyframe::new(0.0, 20.0), Keyframe::new(1.0, 40.0)]);
    }

    #[test]
    fn test_range_value_single_range_and_fixed() {
        let tracks = parse_range_value("[2 6]");
        assert_eq!(tracks.min_track, vec![Keyframe::new(0.0, 2.0)]);
        assert_eq!(tracks.width_track, vec![Keyframe::new(0.0, 4.0)]);

        let tracks = parse_range_value("3");
        assert_eq!((tracks.initial_min, tracks.initial_max), (3.0, 3.0));
        assert_eq!(tracks.width_track, vec![Keyframe::new(0.0, 0.0)]);
    }

    #[test]
    fn test_range_value_random_target_widens() {
        let tracks = parse_range_value("0 [-40 10]");
        assert_eq!(tracks.min_track, vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, -40.0)]);
        assert_eq!(tracks.width_track, vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 50.0)]);
    }

    #[test]
    fn test_range_value_hybrid_converges() {
        let tracks = parse_range_value("[-720 720] 0,40");
        assert_eq!(tracks.min_track, vec![Keyframe::new(0.0, -720.0), Keyframe::new(0.4, 0.0)]);
        assert_eq!(tracks.width_track, vec![Keyframe::new(0.0, 1440.0), Keyframe::new(0.4, 0.0)]);
    }

    #[test]
    fn test_range_value_sequence() {
        let tracks = parse_range_value("0,2 1,5");
        assert_eq!(tracks.min_track, vec![Keyframe::new(0.0, 2.0), Keyframe::new(1.0, 5.0)]);
        assert_eq!((tracks.initial_min, tracks.initial_max), (2.0, 2.0));
    }
}
