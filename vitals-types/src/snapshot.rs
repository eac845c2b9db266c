//! Snapshot - the statistics published by one flush.

use core::fmt;

use crate::{ParameterReading, SchemaVersion};

/// What caused a cycle boundary to be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FlushTrigger {
    /// The host model signalled the start of a ventricular contraction.
    Contraction,
    /// No contraction arrived within the backup interval.
    Backup,
}

impl fmt::Display for FlushTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushTrigger::Contraction => f.write_str("contraction"),
            FlushTrigger::Backup => f.write_str("backup"),
        }
    }
}

/// The per-cycle statistics of every monitored parameter.
///
/// A snapshot is taken right after a flush and is what display
/// collaborators consume. Parameters keep their configuration order.
///
/// # Example
///
/// ```rust
/// use vitals_types::{FlushTrigger, ParameterKind, ParameterReading, ParameterSpec, Snapshot};
///
/// let hr = ParameterSpec::new("Heart", "heart_rate", ParameterKind::Vital);
/// let snapshot = Snapshot::builder()
///     .cycle(1)
///     .trigger(FlushTrigger::Backup)
///     .reading(ParameterReading::new(&hr).value(0.0))
///     .build();
///
/// assert_eq!(snapshot.trigger, Some(FlushTrigger::Backup));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Schema version for forward compatibility.
    pub version: SchemaVersion,

    /// Number of flushes performed so far, this one included.
    pub cycle: u64,

    /// Simulated time at which the flush happened.
    pub time: f64,

    /// Simulated length of the cycle that was just closed.
    pub duration: f64,

    /// Cause of the flush, `None` before the first flush.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub trigger: Option<FlushTrigger>,

    /// Published statistics, one per monitored parameter.
    pub parameters: Vec<ParameterReading>,
}

impl Snapshot {
    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Check if the snapshot holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Number of parameters in the snapshot.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Get the reading for a specific source.
    pub fn get(&self, model: &str, prop: &str) -> Option<&ParameterReading> {
        self.parameters
            .iter()
            .find(|p| p.model == model && p.prop == prop)
    }

    /// Iterate over all readings.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterReading> {
        self.parameters.iter()
    }

    /// Beats per minute implied by the last cycle length.
    ///
    /// Returns None before the first flush or when the cycle had no length.
    pub fn cycle_rate(&self) -> Option<f64> {
        if self.trigger.is_some() && self.duration > 0.0 {
            Some(60.0 / self.duration)
        } else {
            None
        }
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    cycle: u64,
    time: f64,
    duration: f64,
    trigger: Option<FlushTrigger>,
    parameters: Vec<ParameterReading>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flush count.
    pub fn cycle(mut self, cycle: u64) -> Self {
        self.cycle = cycle;
        self
    }

    /// Set the simulated flush time.
    pub fn time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Set the simulated cycle length.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the flush cause.
    pub fn trigger(mut self, trigger: FlushTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Append a parameter reading.
    pub fn reading(mut self, reading: ParameterReading) -> Self {
        self.parameters.push(reading);
        self
    }

    /// Append several parameter readings.
    pub fn readings(mut self, readings: impl IntoIterator<Item = ParameterReading>) -> Self {
        self.parameters.extend(readings);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        Snapshot {
            version: SchemaVersion::current(),
            cycle: self.cycle,
            time: self.time,
            duration: self.duration,
            trigger: self.trigger,
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParameterKind, ParameterSpec};

    fn sample() -> Snapshot {
        let pres = ParameterSpec::new("AA", "pres", ParameterKind::Vital);
        let flow = ParameterSpec::new("LV_AA", "flow", ParameterKind::Flow).with_decimals(2);
        Snapshot::builder()
            .cycle(3)
            .time(1.5)
            .duration(0.5)
            .trigger(FlushTrigger::Contraction)
            .reading(ParameterReading::new(&pres).value(61.0).range(40.0, 70.0).result("61"))
            .reading(ParameterReading::new(&flow).integral(0.01, 1.2).result("1.20"))
            .build()
    }

    #[test]
    fn test_snapshot_builder() {
        let snapshot = sample();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.cycle, 3);
        assert!(snapshot.version.is_compatible());
        assert_eq!(snapshot.get("LV_AA", "flow").unwrap().result, "1.20");
        assert!(snapshot.get("LV", "pres").is_none());
    }

    #[test]
    fn readings_keep_insertion_order() {
        let labels: Vec<String> = sample().iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["AA.pres", "LV_AA.flow"]);
    }

    #[test]
    fn cycle_rate_from_duration() {
        assert_eq!(sample().cycle_rate(), Some(120.0));

        let empty = Snapshot::builder().build();
        assert!(empty.is_empty());
        assert_eq!(empty.cycle_rate(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["trigger"], "contraction");
        assert_eq!(json["parameters"][1]["type"], "flow");
        assert_eq!(json["version"]["major"], 1);

        let parsed: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_keeps_non_finite_readings() {
        let missing = ParameterSpec::new("LV", "vol", ParameterKind::Stroke);
        let snapshot = Snapshot::builder()
            .cycle(1)
            .reading(
                ParameterReading::new(&missing)
                    .value(f64::NAN)
                    .range(f64::INFINITY, f64::NEG_INFINITY)
                    .integral(f64::NAN, f64::NAN)
                    .result("NaN"),
            )
            .build();

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        assert!(json.contains(r#""value": "NaN""#));
        assert!(json.contains(r#""min": "Infinity""#));

        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        let reading = parsed.get("LV", "vol").unwrap();
        assert!(reading.value.is_nan());
        assert!(reading.stroke.is_nan());
        assert!(reading.flow.is_nan());
        assert_eq!(reading.min, f64::INFINITY);
        assert_eq!(reading.max, f64::NEG_INFINITY);
        assert_eq!(reading.result, "NaN");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_null_statistics_read_as_nan() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["parameters"][0]["value"] = serde_json::Value::Null;

        let parsed: Snapshot = serde_json::from_value(json).unwrap();
        assert!(parsed.get("AA", "pres").unwrap().value.is_nan());
    }
}
