//! # cycle-monitor
//!
//! Per-cardiac-cycle vital-sign statistics for physiological simulation
//! engines.
//!
//! The host engine produces instantaneous values (pressures, flows) every
//! simulation tick. This crate turns that stream into per-cycle statistics
//! (min, max, stroke volume, per-minute flow) with display-ready, rounded
//! results, detecting cycle boundaries from the engine's contraction signal
//! and falling back to a periodic flush when the signal never arrives.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          App (tick driver)                   │
//! │  ┌─────────┐    ┌────────────────────┐    ┌───────────────┐  │
//! │  │ source  │───▶│        data        │───▶│ VitalsHandle  │──┼──▶ display
//! │  │ (frames)│    │ (CycleAggregator)  │    │ (latest cycle)│  │
//! │  └─────────┘    └────────────────────┘    └───────────────┘  │
//! │       ▲                                                      │
//! │       └── TraceFile | ChannelSource                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: The [`CycleAggregator`], its owned per-parameter records,
//!   the [`ModelState`] seam to the host model and fixed-precision rounding
//! - **[`source`]**: The [`FrameSource`] trait with a JSON-lines trace
//!   replay and an in-process channel
//! - **[`app`]**: [`App`] steps the aggregator once per frame and publishes
//!   each completed cycle to a [`VitalsHandle`]
//! - **[`config`]**: Layered configuration and logging setup
//!
//! ## Usage
//!
//! ### Embedded in an engine loop
//!
//! ```
//! use cycle_monitor::{CycleAggregator, ModelFrame};
//! use vitals_types::{ParameterKind, ParameterSpec};
//!
//! let mut monitor = CycleAggregator::new([
//!     ParameterSpec::new("AA", "pres", ParameterKind::Vital),
//! ]);
//!
//! let frame = ModelFrame::new(0.0005)
//!     .with("AA", "pres", 61.0)
//!     .with("ECG", "ncc_ventricular", 0.0);
//! monitor.step(&frame, true);
//!
//! assert_eq!(monitor.parameter("AA", "pres").unwrap().value(), 61.0);
//! ```
//!
//! ### Replaying a trace
//!
//! ```bash
//! cycle-monitor --trace run.jsonl --config monitor.toml --output vitals.jsonl
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod source;

// Re-export main types for convenience
pub use app::{App, TickStatus, VitalsHandle};
pub use config::{LogLevel, MonitorConfig};
pub use data::{CycleAggregator, ModelState, MonitoredParameter, Phase, TriggerSource};
pub use error::MonitorError;
pub use source::{ChannelSource, FrameSource, ModelFrame, TraceFile};
pub use vitals_types;
