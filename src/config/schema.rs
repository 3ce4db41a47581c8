//! Configuration schema types for `pfx.toml`
//!
//! ```toml
//! [parser]
//! profile = "explicit-hold"
//! trigger_threshold = 10.0
//!
//! [check]
//! strict = true
//! seed = 7
//! ```

use serde::{Deserialize, Serialize};

use crate::parser::ParseOptions;

/// `[check]` section: how effect files are judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckConfig {
    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,
    /// Seed for resolving random formats; the built-in default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Root of `pfx.toml`. Every section is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PfxConfig {
    #[serde(default)]
    pub parser: ParseOptions,
    #[serde(default)]
    pub check: CheckConfig,
}

/// A validation error in the config file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "parser.percent_ceiling")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pfx.toml: '{}' {}", self.field, self.message)
    }
}

impl PfxConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        self.parser
            .heuristics
            .validate()
            .into_iter()
            .map(|message| {
                let (field, rest) = message.split_once(' ').unwrap_or((message.as_str(), ""));
                ConfigValidationError { field: field.to_string(), message: rest.to_string() }
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HeuristicProfile;

    #[test]
    fn test_empty_config_parse() {
        let config: PfxConfig = toml::from_str("").unwrap();
        assert_eq!(config, PfxConfig::default());
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
            [parser]
            profile = "explicit-hold"
            percent_threshold = 1.0
            trigger_threshold = 12.0
            percent_ceiling = 150.0
            trigger_tolerance = 0.01

            [check]
            strict = true
            seed = 7
        "#;
        let config: PfxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.parser.profile, HeuristicProfile::ExplicitHold);
        assert_eq!(config.parser.heuristics.trigger_threshold, 12.0);
        assert_eq!(config.parser.heuristics.percent_ceiling, 150.0);
        assert!(config.check.strict);
        assert_eq!(config.check.seed, Some(7));
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let result: Result<PfxConfig, _> = toml::from_str("[parser]\nprofile = \"v3\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_error_fields() {
        let config: PfxConfig = toml::from_str("[parser]\ntrigger_threshold = 500.0").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "parser.percent_ceiling");
        assert!(errors[0].to_string().starts_with("pfx.toml: 'parser.percent_ceiling'"));
    }
}
