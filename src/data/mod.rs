//! Per-cycle aggregation of host-model samples.
//!
//! This module turns the per-tick values of the host model into per-cycle
//! statistics suitable for display.
//!
//! ## Submodules
//!
//! - [`aggregator`]: The [`CycleAggregator`] state machine (boundary detection, flush, sampling)
//! - [`fixed`]: Fixed-precision rendering of results
//! - [`model`]: The [`ModelState`] trait through which the host model is read
//! - [`parameter`]: The owned [`MonitoredParameter`] statistics record
//!
//! ## Data Flow
//!
//! ```text
//! ModelState (host model, read-only)
//!        │  property(model, prop), modeling_stepsize()
//!        ▼
//! CycleAggregator::step()
//!        │
//!        ├──▶ MonitoredParameter (owned copies: extrema, integral, result)
//!        │
//!        └──▶ CycleAggregator::snapshot() ──▶ vitals_types::Snapshot
//! ```

pub mod aggregator;
pub mod fixed;
pub mod model;
pub mod parameter;

pub use aggregator::{CycleAggregator, Phase, TriggerSource, DEFAULT_BACKUP_INTERVAL};
pub use fixed::to_fixed;
pub use model::ModelState;
pub use parameter::{MonitoredParameter, TEMP_MAX_SENTINEL, TEMP_MIN_SENTINEL};
