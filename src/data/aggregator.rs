//! Cycle-boundary detection and per-cycle aggregation.
//!
//! The [`CycleAggregator`] is stepped once per simulation tick. Every
//! enabled tick it first decides whether a cardiac cycle just ended (and if
//! so flushes the statistics of the completed cycle), then samples and
//! integrates the current values of every monitored parameter.
//!
//! ```text
//!   tick ──▶ contraction signal || backup armed ?
//!                 │ yes                   │ no
//!                 ▼                       │
//!            flush every parameter        │
//!                 │                       │
//!                 └──────────┬────────────┘
//!                            ▼
//!                 sample + integrate every parameter
//!                            │
//!                            ▼
//!          arm backup if no flush for `backup_interval`
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vitals_types::{FlushTrigger, ParameterSpec, Snapshot};

use super::model::ModelState;
use super::parameter::MonitoredParameter;
use crate::error::MonitorError;

/// Default simulated time without a contraction before a backup flush.
pub const DEFAULT_BACKUP_INTERVAL: f64 = 5.0;

/// Host-model property that marks the start of a cycle.
///
/// The property equals 1 exactly on the tick a new ventricular contraction
/// begins and 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSource {
    pub model: String,
    pub prop: String,
}

impl TriggerSource {
    pub fn new(model: impl Into<String>, prop: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prop: prop.into(),
        }
    }

    /// Check whether the model signals a contraction on this tick.
    pub fn is_active<M: ModelState + ?Sized>(&self, model: &M) -> bool {
        model.property(&self.model, &self.prop) == Some(1.0)
    }

    /// Dotted source path, e.g. `ECG.ncc_ventricular`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.model, self.prop)
    }
}

impl Default for TriggerSource {
    fn default() -> Self {
        Self::new("ECG", "ncc_ventricular")
    }
}

/// Lifecycle of the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No enabled tick has run yet.
    Uninitialized,
    /// Records were initialised and are being updated every tick.
    Accumulating,
}

/// Turns per-tick samples into per-cycle statistics.
///
/// # Example
///
/// ```
/// use cycle_monitor::{CycleAggregator, ModelFrame};
/// use vitals_types::{ParameterKind, ParameterSpec};
///
/// let mut aggregator = CycleAggregator::new([
///     ParameterSpec::new("LV_AA", "flow", ParameterKind::Flow).with_decimals(1),
/// ]);
///
/// let mut frame = ModelFrame::new(0.5).with("LV_AA", "flow", 0.02).with("ECG", "ncc_ventricular", 0.0);
/// for _ in 0..4 {
///     aggregator.step(&frame, true);
/// }
///
/// frame.set("ECG", "ncc_ventricular", 1.0);
/// aggregator.step(&frame, true);
///
/// let flow = aggregator.parameter("LV_AA", "flow").unwrap();
/// assert_eq!(aggregator.cycles(), 1);
/// assert_eq!(flow.result(), "1.2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CycleAggregator {
    parameters: Vec<MonitoredParameter>,
    trigger: TriggerSource,
    phase: Phase,

    /// Simulated time since the last flush.
    time_counter: f64,
    /// A backup flush is due on the next tick.
    backup: bool,
    /// Simulated time since the last flush or backup check.
    backup_counter: f64,
    backup_interval: f64,

    cycles: u64,
    clock: f64,
    last_flush_time: f64,
    last_cycle_duration: f64,
    last_trigger: Option<FlushTrigger>,
}

impl CycleAggregator {
    /// Create an aggregator for a fixed list of parameters.
    ///
    /// Uses the default trigger (`ECG.ncc_ventricular`) and backup interval.
    pub fn new(parameters: impl IntoIterator<Item = ParameterSpec>) -> Self {
        Self {
            parameters: parameters.into_iter().map(MonitoredParameter::new).collect(),
            trigger: TriggerSource::default(),
            phase: Phase::Uninitialized,
            time_counter: 0.0,
            backup: false,
            backup_counter: 0.0,
            backup_interval: DEFAULT_BACKUP_INTERVAL,
            cycles: 0,
            clock: 0.0,
            last_flush_time: 0.0,
            last_cycle_duration: 0.0,
            last_trigger: None,
        }
    }

    /// Set the simulated time without contraction after which a backup flush happens.
    pub fn with_backup_interval(mut self, backup_interval: f64) -> Self {
        self.backup_interval = backup_interval;
        self
    }

    /// Set the property that signals a new cycle.
    pub fn with_trigger(mut self, trigger: TriggerSource) -> Self {
        self.trigger = trigger;
        self
    }

    /// Run one simulation tick.
    ///
    /// Does nothing when `enabled` is false; otherwise runs [`cycle`](Self::cycle)
    /// with the model's step size.
    pub fn step<M: ModelState + ?Sized>(&mut self, model: &M, enabled: bool) {
        if enabled {
            self.cycle(model, model.modeling_stepsize());
        }
    }

    /// Reset every parameter to its neutral state and start accumulating.
    pub fn initialize(&mut self) {
        for parameter in &mut self.parameters {
            parameter.reset();
        }
        self.phase = Phase::Accumulating;
        info!(
            parameters = self.parameters.len(),
            trigger = %self.trigger.label(),
            backup_interval = self.backup_interval,
            "cycle monitor initialized"
        );
    }

    /// Evaluate the cycle boundary, then sample every parameter over `dt`.
    pub fn cycle<M: ModelState + ?Sized>(&mut self, model: &M, dt: f64) {
        if self.phase == Phase::Uninitialized {
            self.initialize();
        }

        let contraction = self.trigger.is_active(model);
        if contraction || self.backup {
            let trigger = if contraction {
                FlushTrigger::Contraction
            } else {
                FlushTrigger::Backup
            };
            self.flush(trigger);
        }

        for parameter in &mut self.parameters {
            parameter.sample_from(model, dt);
        }

        // Guarantees a flush when the contraction signal never arrives
        if self.backup_counter > self.backup_interval {
            self.backup = true;
            self.backup_counter = 0.0;
        }

        self.backup_counter += dt;
        self.time_counter += dt;
        self.clock += dt;
    }

    fn flush(&mut self, trigger: FlushTrigger) {
        self.backup = false;
        self.backup_counter = 0.0;

        let elapsed = self.time_counter;
        for parameter in &mut self.parameters {
            parameter.flush(elapsed);
        }

        self.cycles += 1;
        self.last_trigger = Some(trigger);
        self.last_cycle_duration = elapsed;
        self.last_flush_time = self.clock;
        self.time_counter = 0.0;

        if elapsed > 0.0 {
            debug!(cycle = self.cycles, %trigger, duration = elapsed, "cycle flushed");
        } else {
            debug!(
                cycle = self.cycles,
                %trigger,
                "cycle flushed with no elapsed time, flow published as zero"
            );
        }
    }

    /// Check that the model exposes the trigger and every monitored source.
    ///
    /// Stepping never calls this; a missing source simply samples as NaN.
    pub fn validate<M: ModelState + ?Sized>(&self, model: &M) -> Result<(), MonitorError> {
        let trigger = (&self.trigger.model, &self.trigger.prop);
        let sources = self
            .parameters
            .iter()
            .map(|p| (&p.spec().model, &p.spec().prop));

        for (model_name, prop) in std::iter::once(trigger).chain(sources) {
            if !model.has_property(model_name, prop) {
                return Err(MonitorError::UnresolvedSource {
                    model: model_name.clone(),
                    prop: prop.clone(),
                });
            }
        }
        Ok(())
    }

    /// Copy the currently published statistics into a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let mut builder = Snapshot::builder()
            .cycle(self.cycles)
            .time(self.last_flush_time)
            .duration(self.last_cycle_duration)
            .readings(self.parameters.iter().map(MonitoredParameter::reading));
        if let Some(trigger) = self.last_trigger {
            builder = builder.trigger(trigger);
        }
        builder.build()
    }

    pub fn parameters(&self) -> &[MonitoredParameter] {
        &self.parameters
    }

    /// Find the record for a source.
    pub fn parameter(&self, model: &str, prop: &str) -> Option<&MonitoredParameter> {
        self.parameters
            .iter()
            .find(|p| p.spec().is_source(model, prop))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == Phase::Accumulating
    }

    /// Number of flushes so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn trigger(&self) -> &TriggerSource {
        &self.trigger
    }

    pub fn backup_interval(&self) -> f64 {
        self.backup_interval
    }

    /// Whether a backup flush is due on the next tick.
    pub fn backup_armed(&self) -> bool {
        self.backup
    }

    /// Simulated time since the last flush.
    pub fn time_counter(&self) -> f64 {
        self.time_counter
    }

    /// Simulated time accumulated by enabled ticks.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn last_trigger(&self) -> Option<FlushTrigger> {
        self.last_trigger
    }
}
