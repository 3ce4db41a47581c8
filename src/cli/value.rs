//! Single-value command implementations (parse, eval, sample)

use std::process::ExitCode;

use crate::config::PfxConfig;
use crate::parser::{ParseOutcome, ValueParser};
use crate::sampler::seeded;
use crate::validate::{validate_value, Severity};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Which double-range reading `pfx parse` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Random,
    Width,
    Tracks,
}

impl Reading {
    pub fn from_flags(width: bool, tracks: bool) -> Self {
        match (width, tracks) {
            (_, true) => Reading::Tracks,
            (true, false) => Reading::Width,
            (false, false) => Reading::Random,
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the parse command
pub fn run_parse(input: &str, config: &PfxConfig, reading: Reading, json: bool) -> ExitCode {
    let parser = ValueParser::new(config.parser);
    let mut rng = seeded(config.check.seed);

    if reading == Reading::Tracks {
        let (tracks, warnings) = parser.parse_range_value(input);
        for warning in &warnings {
            eprintln!("Warning: {}", warning);
        }
        if json {
            return print_json(&tracks);
        }
        println!("initial: [{} {}]", tracks.initial_min, tracks.initial_max);
        println!("min:     {}", format_track(&tracks.min_track));
        println!("width:   {}", format_track(&tracks.width_track));
        return exit_for(config.check.strict && !warnings.is_empty());
    }

    let outcome: ParseOutcome = match reading {
        Reading::Width => parser.parse_width_range(input, &mut rng),
        _ => parser.parse_random_double_range(input, &mut rng),
    };
    let issues = validate_value(input, &outcome);
    let failed = issues.iter().any(|i| i.severity == Severity::Error) || (config.check.strict && !issues.is_empty());

    if json {
        let output = serde_json::json!({
            "input": input,
            "format": outcome.format,
            "result": outcome.result,
            "canonical": outcome.result.to_string(),
            "issues": issues,
            "valid": !failed,
        });
        let code = print_json(&output);
        return if failed { ExitCode::from(EXIT_ERROR) } else { code };
    }

    println!("{}", outcome.result);
    println!("format: {}", outcome.format);
    if outcome.result.has_keyframes() {
        println!("keyframes: {}", format_track(&outcome.result.keyframes));
    }
    for issue in &issues {
        eprintln!("{}", issue);
    }
    exit_for(failed)
}

/// Execute the eval command
pub fn run_eval(input: &str, config: &PfxConfig, at: &[f64], steps: u32, json: bool) -> ExitCode {
    if at.iter().any(|t| !t.is_finite()) {
        eprintln!("Error: --at must be a finite number");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let parser = ValueParser::new(config.parser);
    let mut rng = seeded(config.check.seed);
    let outcome = parser.parse(input, &mut rng);
    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }

    let curve = outcome.result.to_curve(&mut rng);
    let points: Vec<(f64, f64)> = if at.is_empty() {
        curve.sample_points(steps as usize)
    } else {
        at.iter().map(|&t| (t, curve.value_at(t))).collect()
    };

    if json {
        let points: Vec<_> = points.iter().map(|(t, v)| serde_json::json!({ "t": t, "value": v })).collect();
        return print_json(&serde_json::json!({ "curve": curve, "points": points }));
    }

    for (t, v) in points {
        println!("{}\t{}", t, v);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the sample command
pub fn run_sample(input: &str, config: &PfxConfig, count: u32, json: bool) -> ExitCode {
    let parser = ValueParser::new(config.parser);
    let mut rng = seeded(config.check.seed);
    let outcome = parser.parse(input, &mut rng);
    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }

    let samples: Vec<f64> = (0..count).map(|_| outcome.result.resolve_range(&mut rng)).collect();
    if json {
        return print_json(&samples);
    }
    for value in samples {
        println!("{}", value);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn format_track(keyframes: &[crate::models::Keyframe]) -> String {
    keyframes.iter().map(|k| format!("{{{}, {}}}", k.time, k.value)).collect::<Vec<_>>().join(" ")
}

fn exit_for(failed: bool) -> ExitCode {
    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
