//! Keyframe-sequence parser
//!
//! Consumes whitespace-separated words left to right with one word of
//! lookahead. Bare numbers set the initial value; comma pairs are matched
//! against the rules below, in priority order. `a,b` is the pair, `next`
//! the following word and `initial` whether an initial value is bound.
//!
//! | Rule | Condition | Keyframes |
//! |------|-----------|-----------|
//! | hold-then-interpolate | `b > 1`, `next` scalar, initial bound | `{b%, a}`, `{1, next}` |
//! | trigger | `b > 10`, `next` pair with the same percent, no initial | `{0, a}`, `{b%, next.0}` |
//! | hold-then-decay | `b > 10`, `next` scalar, no initial | profile dependent |
//! | percent-tagged | initial bound, `10 < b < 200` | `{b%, a}` (+ `{1, a}` if last pair) |
//! | quick interpolate | initial bound, `b <= 10` | `{b%, a}` (+ `{1, a}` for explicit hold) |
//! | standard | otherwise | `{a, b}` |
//!
//! The thresholds come from [`Heuristics`]; rules that consume `next` skip it.

use tracing::trace;

use crate::models::{InterpolationMode, Keyframe, ParseResult, Warning};

use super::options::{HeuristicProfile, ParseOptions};
use super::scalar::{parse_number, parse_pair};

/// A word of the sequence, classified once up front.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Item {
    Scalar(f64),
    Pair(f64, f64),
    Skip,
}

impl Item {
    fn classify(word: &str) -> Item {
        if word.contains(',') {
            parse_pair(word).map_or(Item::Skip, |(a, b)| Item::Pair(a, b))
        } else {
            parse_number(word).map_or(Item::Skip, Item::Scalar)
        }
    }
}

/// The interpretation chosen for one comma pair.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PairRule {
    HoldThenInterpolate { middle: f64, at: f64, last: f64 },
    Trigger { from: f64, to: f64, at: f64 },
    HoldThenDecay { hold: f64, until: f64, target: f64 },
    PercentTagged { value: f64, at: f64, hold_to_end: bool },
    QuickInterpolate { target: f64, at: f64 },
    Standard { time: f64, value: f64 },
}

impl PairRule {
    /// Whether the rule also consumed the lookahead word.
    fn consumes_next(&self) -> bool {
        matches!(
            self,
            PairRule::HoldThenInterpolate { .. }
                | PairRule::Trigger { .. }
                | PairRule::HoldThenDecay { .. }
        )
    }
}

struct SequenceParser<'o> {
    items: Vec<Item>,
    pos: usize,
    initial: Option<f64>,
    keyframes: Vec<Keyframe>,
    options: &'o ParseOptions,
}

impl<'o> SequenceParser<'o> {
    fn new(words: &[&str], options: &'o ParseOptions) -> Self {
        Self {
            items: words.iter().map(|w| Item::classify(w)).collect(),
            pos: 0,
            initial: None,
            keyframes: Vec::new(),
            options,
        }
    }

    fn peek(&self) -> Option<Item> {
        self.items.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Item> {
        let item = self.peek()?;
        self.pos += 1;
        Some(item)
    }

    /// No further comma pairs after the cursor.
    fn is_last_pair(&self) -> bool {
        !self.items[self.pos..].iter().any(|item| matches!(item, Item::Pair(..)))
    }

    fn push(&mut self, time: f64, value: f64) {
        self.keyframes.push(Keyframe::new(time, value));
    }

    fn run(mut self, words: &[&str], warnings: &mut Vec<Warning>) -> Vec<Keyframe> {
        while let Some(item) = self.advance() {
            match item {
                Item::Scalar(value) => self.scalar(value, warnings),
                Item::Pair(a, b) => {
                    let rule = self.classify_pair(a, b);
                    trace!(?rule, "keyframe pair");
                    if rule.consumes_next() {
                        self.pos += 1;
                    }
                    self.apply(rule);
                }
                Item::Skip => warnings.push(Warning::new(format!(
                    "Ignoring unparseable token '{}'",
                    words[self.pos - 1]
                ))),
            }
        }
        self.keyframes
    }

    fn scalar(&mut self, value: f64, warnings: &mut Vec<Warning>) {
        if self.keyframes.is_empty() {
            self.initial = Some(value);
            self.push(0.0, value);
        } else {
            warnings.push(Warning::new(format!("Ignoring stray value '{}' after keyframes", value)));
        }
    }

    fn classify_pair(&self, a: f64, b: f64) -> PairRule {
        let h = &self.options.heuristics;
        let next = self.peek();
        let at = b / 100.0;

        match (next, self.initial) {
            (Some(Item::Scalar(last)), Some(_)) if b > h.percent_threshold => {
                return PairRule::HoldThenInterpolate { middle: a, at, last };
            }
            (Some(Item::Pair(to, next_b)), None)
                if b > h.trigger_threshold && (next_b - b).abs() <= h.trigger_tolerance =>
            {
                return PairRule::Trigger { from: a, to, at };
            }
            (Some(Item::Scalar(target)), None) if b > h.trigger_threshold => {
                return PairRule::HoldThenDecay { hold: a, until: at, target };
            }
            _ => {}
        }

        if self.initial.is_some() {
            if b > h.trigger_threshold && b < h.percent_ceiling {
                return PairRule::PercentTagged { value: a, at, hold_to_end: self.is_last_pair() };
            }
            if b <= h.trigger_threshold {
                return PairRule::QuickInterpolate { target: a, at };
            }
        }

        PairRule::Standard { time: a, value: b }
    }

    fn apply(&mut self, rule: PairRule) {
        let explicit = self.options.profile == HeuristicProfile::ExplicitHold;

        match rule {
            PairRule::HoldThenInterpolate { middle, at, last } => {
                self.push(at, middle);
                self.push(1.0, last);
            }
            PairRule::Trigger { from, to, at } => {
                self.initial = Some(from);
                self.push(0.0, from);
                self.push(at, to);
            }
            PairRule::HoldThenDecay { hold, until, target } => {
                self.initial = Some(hold);
                self.push(0.0, hold);
                if explicit {
                    self.push(until, hold);
                    self.push(1.0, target);
                } else {
                    self.push(until, target);
                }
            }
            PairRule::PercentTagged { value, at, hold_to_end } => {
                self.push(at, value);
                if hold_to_end && at < 1.0 {
                    self.push(1.0, value);
                }
            }
            PairRule::QuickInterpolate { target, at } => {
                self.push(at, target);
                if explicit && at < 1.0 {
                    self.push(1.0, target);
                }
            }
            PairRule::Standard { time, value } => self.push(time, value),
        }
    }
}

/// Parse keyword-free words into a keyframe sequence.
///
/// Returns `None` when no keyframe was produced so the caller can fall back
/// to the fixed-value parser.
pub fn parse_sequence(
    words: &[&str],
    interpolation: InterpolationMode,
    options: &ParseOptions,
    warnings: &mut Vec<Warning>,
) -> Option<ParseResult> {
    let keyframes = SequenceParser::new(words, options).run(words, warnings);
    if keyframes.is_empty() {
        None
    } else {
        Some(ParseResult::sequence(keyframes, interpolation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyframes_with(input: &str, options: &ParseOptions) -> Vec<Keyframe> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let mut warnings = Vec::new();
        parse_sequence(&words, InterpolationMode::Unspecified, options, &mut warnings)
            .map(|r| r.keyframes)
            .unwrap_or_default()
    }

    fn keyframes(input: &str) -> Vec<Keyframe> {
        keyframes_with(input, &ParseOptions::default())
    }

    fn explicit() -> ParseOptions {
        ParseOptions::default().with_profile(HeuristicProfile::ExplicitHold)
    }

    fn kf(time: f64, value: f64) -> Keyframe {
        Keyframe::new(time, value)
    }

    #[test]
    fn test_standard_pairs() {
        assert_eq!(keyframes("0,2 1,2 4,21"), vec![kf(0.0, 2.0), kf(1.0, 2.0), kf(4.0, 21.0)]);
    }

    #[test]
    fn test_initial_then_quick_interpolate() {
        let k = keyframes(".4 10,9.999999");
        assert_eq!(k.len(), 2);
        assert_eq!(k[0], kf(0.0, 0.4));
        assert!((k[1].time - 0.09999999).abs() < 1e-12);
        assert_eq!(k[1].value, 10.0);
    }

    #[test]
    fn test_quick_interpolate_explicit_hold() {
        let k = keyframes_with(".4 10,9.999999", &explicit());
        assert_eq!(k.len(), 3);
        assert_eq!(k[2], kf(1.0, 10.0));
    }

    #[test]
    fn test_hold_then_decay_reference() {
        assert_eq!(keyframes("1,95 0"), vec![kf(0.0, 1.0), kf(0.95, 0.0)]);
    }

    #[test]
    fn test_hold_then_decay_explicit() {
        assert_eq!(
            keyframes_with(".9,70 0", &explicit()),
            vec![kf(0.0, 0.9), kf(0.7, 0.9), kf(1.0, 0.0)]
        );
    }

    #[test]
    fn test_trigger() {
        assert_eq!(keyframes("1,50 0,50"), vec![kf(0.0, 1.0), kf(0.5, 0.0)]);
    }

    #[test]
    fn test_trigger_requires_matching_percent() {
        // Second pair's percent differs: both fall back to standard pairs
        assert_eq!(keyframes("1,50 0,60"), vec![kf(1.0, 50.0), kf(0.0, 60.0)]);
    }

    #[test]
    fn test_trigger_tolerance() {
        let k = keyframes("1,50 0,50.0005");
        assert_eq!(k, vec![kf(0.0, 1.0), kf(0.5, 0.0)]);
    }

    #[test]
    fn test_hold_then_interpolate_with_initial() {
        assert_eq!(keyframes("0 1,20 0"), vec![kf(0.0, 0.0), kf(0.2, 1.0), kf(1.0, 0.0)]);
    }

    #[test]
    fn test_percent_tagged_last_pair_holds() {
        assert_eq!(
            keyframes("0 1,20 .5,80"),
            vec![kf(0.0, 0.0), kf(0.2, 1.0), kf(0.8, 0.5), kf(1.0, 0.5)]
        );
    }

    #[test]
    fn test_percent_tagged_at_end_does_not_duplicate() {
        assert_eq!(keyframes("0 1,100"), vec![kf(0.0, 0.0), kf(1.0, 1.0)]);
    }

    #[test]
    fn test_percent_ceiling_falls_back_to_standard() {
        assert_eq!(keyframes("0 1,250"), vec![kf(0.0, 0.0), kf(1.0, 250.0)]);
    }

    #[test]
    fn test_stray_scalar_ignored() {
        let words = ["0,1", "5"];
        let mut warnings = Vec::new();
        let result =
            parse_sequence(&words, InterpolationMode::Linear, &ParseOptions::default(), &mut warnings)
                .unwrap();
        assert_eq!(result.keyframes, vec![kf(0.0, 1.0)]);
        assert_eq!(result.interpolation, InterpolationMode::Linear);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unparseable_words_skipped() {
        let words = ["abc,1", "0,1", "zz"];
        let mut warnings = Vec::new();
        let result =
            parse_sequence(&words, InterpolationMode::Unspecified, &ParseOptions::default(), &mut warnings)
                .unwrap();
        assert_eq!(result.keyframes, vec![kf(0.0, 1.0)]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("abc,1"));
        assert!(warnings[1].message.contains("zz"));
    }

    #[test]
    fn test_nothing_parsed_is_none() {
        let mut warnings = Vec::new();
        assert!(parse_sequence(&["x,y"], InterpolationMode::Unspecified, &ParseOptions::default(), &mut warnings)
            .is_none());
        assert!(parse_sequence(&[], InterpolationMode::Linear, &ParseOptions::default(), &mut warnings).is_none());
    }

    #[test]
    fn test_custom_trigger_threshold() {
        let mut options = ParseOptions::default();
        options.heuristics.trigger_threshold = 100.0;
        // 95 no longer counts as a percentage: plain time/value pair, stray scalar ignored
        assert_eq!(keyframes_with("1,95 0", &options), vec![kf(1.0, 95.0)]);
    }
}
