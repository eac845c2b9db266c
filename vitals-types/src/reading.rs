//! Published per-parameter statistics for one completed cycle.

use crate::{ParameterKind, ParameterSpec};

/// Statistics of one monitored parameter as published at the latest flush.
///
/// `value` is the most recent instantaneous sample; every other numeric
/// field describes the last completed cycle. `result` is the display
/// string, already rounded to the parameter's configured precision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterReading {
    /// Component name in the host model.
    pub model: String,

    /// Property name on that component.
    pub prop: String,

    /// How `result` was derived.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ParameterKind,

    /// Last instantaneous sample.
    #[cfg_attr(feature = "serde", serde(with = "crate::float"))]
    pub value: f64,

    /// Largest sample of the last cycle.
    #[cfg_attr(feature = "serde", serde(with = "crate::float"))]
    pub max: f64,

    /// Smallest sample of the last cycle.
    #[cfg_attr(feature = "serde", serde(with = "crate::float"))]
    pub min: f64,

    /// Time integral of the last cycle.
    #[cfg_attr(feature = "serde", serde(with = "crate::float"))]
    pub stroke: f64,

    /// Stroke converted to a per-minute rate.
    #[cfg_attr(feature = "serde", serde(with = "crate::float"))]
    pub flow: f64,

    /// Rounded display string.
    pub result: String,
}

impl ParameterReading {
    /// Create a zeroed reading for a parameter.
    pub fn new(spec: &ParameterSpec) -> Self {
        Self {
            model: spec.model.clone(),
            prop: spec.prop.clone(),
            kind: spec.kind,
            value: 0.0,
            max: 0.0,
            min: 0.0,
            stroke: 0.0,
            flow: 0.0,
            result: "0".to_string(),
        }
    }

    /// Set the instantaneous value.
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the cycle extrema.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the cycle integral and its per-minute rate.
    pub fn integral(mut self, stroke: f64, flow: f64) -> Self {
        self.stroke = stroke;
        self.flow = flow;
        self
    }

    /// Set the display result.
    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = result.into();
        self
    }

    /// Dotted source path, e.g. `LV.pres`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.model, self.prop)
    }

    /// The numeric statistic that `result` was rounded from.
    pub fn result_source(&self) -> f64 {
        match self.kind {
            ParameterKind::Flow => self.flow,
            ParameterKind::Vital => self.value,
            ParameterKind::Stroke => self.stroke,
        }
    }
}
