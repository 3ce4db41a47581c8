//! Effect definition documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A particle effect definition: a set of emitters, each carrying raw
/// property value strings (`"SystemAlpha": "1,95 0"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EffectDefinition {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emitters: Vec<EmitterDefinition>,
}

/// One emitter of an effect with its unparsed property strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EmitterDefinition {
    pub name: String,
    /// Property name -> raw value string, kept in name order
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_json5_effect() {
        let src = r#"{
            // comments and unquoted keys are allowed
            name: "spark",
            emitters: [
                { name: "core", properties: { SystemAlpha: "1,95 0", Scale: "[0.7 0.9]" } },
            ],
        }"#;
        let effect: EffectDefinition = json5::from_str(src).unwrap();
        assert_eq!(effect.name.as_deref(), Some("spark"));
        assert_eq!(effect.emitters.len(), 1);
        assert_eq!(effect.emitters[0].properties["SystemAlpha"], "1,95 0");
    }

    #[test]
    fn test_emitter_properties_default_empty() {
        let effect: EffectDefinition = json5::from_str(r#"{ emitters: [{ name: "bare" }] }"#).unwrap();
        assert!(effect.emitters[0].properties.is_empty());
        assert!(effect.name.is_none());
    }
}
