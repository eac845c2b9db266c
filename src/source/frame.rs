//! One tick's view of the host model.
//!
//! A frame carries the model's step size and its property tree, the same
//! shape a host engine exposes as `components[model][prop]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::ModelState;

/// Properties of one model component, keyed by property name.
pub type ComponentProps = BTreeMap<String, Value>;

/// A snapshot of the host model's exposed state for one tick.
///
/// Non-numeric properties may be present; they are simply not sampleable.
/// Booleans read as 1 or 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelFrame {
    /// Simulated time advanced by this tick.
    pub modeling_stepsize: f64,

    /// Component name to exposed properties.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentProps>,
}

impl ModelFrame {
    /// Create an empty frame.
    pub fn new(modeling_stepsize: f64) -> Self {
        Self {
            modeling_stepsize,
            components: BTreeMap::new(),
        }
    }

    /// Add a numeric property.
    pub fn with(mut self, model: &str, prop: &str, value: f64) -> Self {
        self.set(model, prop, value);
        self
    }

    /// Set a numeric property, creating the component if needed.
    pub fn set(&mut self, model: &str, prop: &str, value: f64) {
        self.components
            .entry(model.to_string())
            .or_default()
            .insert(prop.to_string(), Value::from(value));
    }

    /// Number of components in the frame.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ModelState for ModelFrame {
    fn modeling_stepsize(&self) -> f64 {
        self.modeling_stepsize
    }

    fn property(&self, model: &str, prop: &str) -> Option<f64> {
        let value = self.components.get(model)?.get(prop)?;
        value.as_f64().or_else(|| value.as_bool().map(f64::from))
    }
}
