//! Heuristic thresholds and profiles for keyframe-sequence disambiguation.

use serde::{Deserialize, Serialize};

/// How the keyframe-sequence parser spells out "hold" segments.
///
/// Effect files were written against more than one revision of the
/// effect player, which disagreed on whether a held value needs its own
/// keyframe. Both readings evaluate identically wherever the evaluator's
/// clamp-high already holds the final value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicProfile {
    /// `v,p final` fades from `v` to `final` by `p%`; `initial v,p` stops
    /// at `v` without an explicit trailing hold keyframe.
    #[default]
    Reference,
    /// `v,p final` holds `v` until `p%` and then decays to `final` at the
    /// end; quick interpolation appends a hold keyframe at `t = 1`.
    ExplicitHold,
}

impl HeuristicProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeuristicProfile::Reference => "reference",
            HeuristicProfile::ExplicitHold => "explicit-hold",
        }
    }
}

fn default_percent_threshold() -> f64 {
    1.0
}

fn default_trigger_threshold() -> f64 {
    10.0
}

fn default_percent_ceiling() -> f64 {
    200.0
}

fn default_trigger_tolerance() -> f64 {
    0.001
}

/// Magnitude thresholds used to tell times, percentages and values apart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Heuristics {
    /// A second component above this is a percentage, not a fraction
    #[serde(default = "default_percent_threshold")]
    pub percent_threshold: f64,
    /// A second component above this starts a trigger or hold pattern
    #[serde(default = "default_trigger_threshold")]
    pub trigger_threshold: f64,
    /// Percent-tagged values must stay below this
    #[serde(default = "default_percent_ceiling")]
    pub percent_ceiling: f64,
    /// Two trigger percentages within this distance are synchronized
    #[serde(default = "default_trigger_tolerance")]
    pub trigger_tolerance: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            percent_threshold: default_percent_threshold(),
            trigger_threshold: default_trigger_threshold(),
            percent_ceiling: default_percent_ceiling(),
            trigger_tolerance: default_trigger_tolerance(),
        }
    }
}

impl Heuristics {
    /// Normalize a time that may be written as a percentage.
    pub fn normalize_time(&self, time: f64) -> f64 {
        if time > self.percent_threshold {
            time / 100.0
        } else {
            time
        }
    }

    /// Check the thresholds for internal consistency.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let finite = [
            ("percent_threshold", self.percent_threshold),
            ("trigger_threshold", self.trigger_threshold),
            ("percent_ceiling", self.percent_ceiling),
            ("trigger_tolerance", self.trigger_tolerance),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                errors.push(format!("parser.{} must be a finite number", name));
            }
        }
        if self.percent_threshold < 0.0 {
            errors.push("parser.percent_threshold must not be negative".to_string());
        }
        if self.trigger_threshold < self.percent_threshold {
            errors.push("parser.trigger_threshold must be >= percent_threshold".to_string());
        }
        if self.percent_ceiling <= self.trigger_threshold {
            errors.push("parser.percent_ceiling must be greater than trigger_threshold".to_string());
        }
        if self.trigger_tolerance < 0.0 {
            errors.push("parser.trigger_tolerance must not be negative".to_string());
        }
        errors
    }
}

/// Options controlling the value parser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ParseOptions {
    #[serde(default)]
    pub profile: HeuristicProfile,
    #[serde(flatten)]
    pub heuristics: Heuristics,
}

impl ParseOptions {
    pub fn with_profile(mut self, profile: HeuristicProfile) -> Self {
        self.profile = profile;
        self
    }
}
