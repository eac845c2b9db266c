//! Parameter descriptors - which host-model quantity to monitor and how to report it.

use core::fmt;
use core::str::FromStr;

/// How a monitored parameter's display result is derived at each flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ParameterKind {
    /// Result is the cycle integral converted to a per-minute rate.
    Flow,
    /// Result is the instantaneous value captured at flush time.
    Vital,
    /// Result is the raw cycle integral.
    Stroke,
}

impl ParameterKind {
    /// Returns the configuration name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Flow => "flow",
            ParameterKind::Vital => "vital",
            ParameterKind::Stroke => "stroke",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown parameter kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown parameter type: {} (expected flow, vital or stroke)", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for ParameterKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flow" => Ok(ParameterKind::Flow),
            "vital" => Ok(ParameterKind::Vital),
            "stroke" => Ok(ParameterKind::Stroke),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// Descriptor of one monitored quantity.
///
/// The `(model, prop)` pair addresses a property in the host model's
/// property tree, e.g. `("LV", "pres")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSpec {
    /// Component name in the host model.
    pub model: String,

    /// Property name on that component.
    pub prop: String,

    /// How the display result is derived.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ParameterKind,

    /// Number of fractional digits in the display result.
    #[cfg_attr(feature = "serde", serde(default))]
    pub decimals: u32,
}

impl ParameterSpec {
    /// Create a descriptor with zero decimals.
    pub fn new(model: impl Into<String>, prop: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            model: model.into(),
            prop: prop.into(),
            kind,
            decimals: 0,
        }
    }

    /// Set the display precision.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Dotted source path, e.g. `LV.pres`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.model, self.prop)
    }

    /// Check whether this descriptor addresses the given source.
    pub fn is_source(&self, model: &str, prop: &str) -> bool {
        self.model == model && self.prop == prop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("flow".parse::<ParameterKind>(), Ok(ParameterKind::Flow));
        assert_eq!(" Vital ".parse::<ParameterKind>(), Ok(ParameterKind::Vital));
        assert_eq!("STROKE".parse::<ParameterKind>(), Ok(ParameterKind::Stroke));
        assert!("pressure".parse::<ParameterKind>().is_err());
    }

    #[test]
    fn kind_display_matches_config_name() {
        assert_eq!(ParameterKind::Flow.to_string(), "flow");
        assert_eq!(ParameterKind::Stroke.as_str(), "stroke");
    }

    #[test]
    fn spec_label_and_source() {
        let spec = ParameterSpec::new("LV", "pres", ParameterKind::Vital).with_decimals(1);
        assert_eq!(spec.label(), "LV.pres");
        assert_eq!(spec.decimals, 1);
        assert!(spec.is_source("LV", "pres"));
        assert!(!spec.is_source("RV", "pres"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn spec_deserializes_with_type_field() {
        let json = r#"{ "model": "LV_AA", "prop": "flow", "type": "flow", "decimals": 2 }"#;
        let spec: ParameterSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.kind, ParameterKind::Flow);
        assert_eq!(spec.decimals, 2);

        let json = r#"{ "model": "AA", "prop": "pres", "type": "vital" }"#;
        let spec: ParameterSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.decimals, 0);
    }
}
