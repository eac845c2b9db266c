//! The aggregator's owned statistics record for one monitored parameter.

use tracing::warn;
use vitals_types::{ParameterKind, ParameterReading, ParameterSpec};

use super::fixed::to_fixed;
use super::model::ModelState;

/// Running maximum right after a flush.
///
/// Any plausible physiological sample lies strictly inside
/// `(TEMP_MAX_SENTINEL, TEMP_MIN_SENTINEL)`, so the first sample of a cycle
/// always replaces both sentinels.
pub const TEMP_MAX_SENTINEL: f64 = -1000.0;

/// Running minimum right after a flush.
pub const TEMP_MIN_SENTINEL: f64 = 1000.0;

/// Live sampling state and published per-cycle statistics of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredParameter {
    spec: ParameterSpec,

    // Live sampling state
    value: f64,
    temp_max: f64,
    temp_min: f64,
    counter: f64,

    // Published at the last flush
    max: f64,
    min: f64,
    stroke: f64,
    flow: f64,
    result: String,

    /// Set once the missing source has been reported.
    source_missing: bool,
}

impl MonitoredParameter {
    /// Create a record in its neutral state.
    pub fn new(spec: ParameterSpec) -> Self {
        Self {
            spec,
            value: 0.0,
            temp_max: TEMP_MAX_SENTINEL,
            temp_min: TEMP_MIN_SENTINEL,
            counter: 0.0,
            max: 0.0,
            min: 0.0,
            stroke: 0.0,
            flow: 0.0,
            result: "0".to_string(),
            source_missing: false,
        }
    }

    /// Return every field to its neutral value.
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.max = 0.0;
        self.min = 0.0;
        self.temp_max = TEMP_MAX_SENTINEL;
        self.temp_min = TEMP_MIN_SENTINEL;
        self.counter = 0.0;
        self.stroke = 0.0;
        self.flow = 0.0;
        self.result = "0".to_string();
    }

    /// Close the current cycle.
    ///
    /// `elapsed` is the simulated length of the cycle. When it is not
    /// positive the per-minute rate is undefined and `flow` is published
    /// as zero.
    pub(crate) fn flush(&mut self, elapsed: f64) {
        self.max = self.temp_max;
        self.min = self.temp_min;
        self.stroke = self.counter;
        self.flow = if elapsed > 0.0 {
            (self.counter / elapsed) * 60.0
        } else {
            0.0
        };

        self.temp_max = TEMP_MAX_SENTINEL;
        self.temp_min = TEMP_MIN_SENTINEL;
        self.counter = 0.0;

        let source = match self.spec.kind {
            ParameterKind::Flow => self.flow,
            ParameterKind::Vital => self.value,
            ParameterKind::Stroke => self.stroke,
        };
        self.result = to_fixed(source, self.spec.decimals);
    }

    /// Record one instantaneous sample taken over a tick of length `dt`.
    pub(crate) fn sample(&mut self, value: f64, dt: f64) {
        self.value = value;
        // NaN never compares greater or smaller, so the extrema skip it
        if value > self.temp_max {
            self.temp_max = value;
        }
        if value < self.temp_min {
            self.temp_min = value;
        }
        self.counter += value * dt;
    }

    /// Copy this parameter's current value out of the model and record it.
    ///
    /// A source the model does not expose samples as NaN, which then shows
    /// up in the integral and the result. It is reported once.
    pub(crate) fn sample_from<M: ModelState + ?Sized>(&mut self, model: &M, dt: f64) {
        let value = match model.property(&self.spec.model, &self.spec.prop) {
            Some(value) => value,
            None => {
                if !self.source_missing {
                    warn!(
                        source = %self.spec.label(),
                        "monitored property not exposed by the model, sampling NaN"
                    );
                    self.source_missing = true;
                }
                f64::NAN
            }
        };
        self.sample(value, dt);
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    /// Last instantaneous sample.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Running maximum since the last flush.
    pub fn temp_max(&self) -> f64 {
        self.temp_max
    }

    /// Running minimum since the last flush.
    pub fn temp_min(&self) -> f64 {
        self.temp_min
    }

    /// Running time integral since the last flush.
    pub fn counter(&self) -> f64 {
        self.counter
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn stroke(&self) -> f64 {
        self.stroke
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    /// Rounded display string published at the last flush.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Copy the published statistics into a reading.
    pub fn reading(&self) -> ParameterReading {
        ParameterReading::new(&self.spec)
            .value(self.value)
            .range(self.min, self.max)
            .integral(self.stroke, self.flow)
            .result(self.result.clone())
    }
}
