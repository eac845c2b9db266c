//! # vitals-types
//!
//! Core types for per-cycle vital-sign statistics. This crate defines the
//! vocabulary shared between the cycle aggregator that produces statistics
//! and the display collaborators that read them.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **Display ready**: Every reading carries its rounded result string
//! - **Lossless JSON**: Non-finite statistics survive a JSON round trip
//! - **Versioned schema**: Snapshots include version info for forward compatibility
//!
//! ## Example
//!
//! ```rust
//! use vitals_types::{FlushTrigger, ParameterKind, ParameterReading, ParameterSpec, Snapshot};
//!
//! let spec = ParameterSpec::new("LV_AA", "flow", ParameterKind::Flow).with_decimals(2);
//!
//! let snapshot = Snapshot::builder()
//!     .cycle(12)
//!     .time(6.25)
//!     .duration(0.42)
//!     .trigger(FlushTrigger::Contraction)
//!     .reading(ParameterReading::new(&spec).result("0.21"))
//!     .build();
//!
//! assert_eq!(snapshot.len(), 1);
//! assert_eq!(snapshot.get("LV_AA", "flow").unwrap().result, "0.21");
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1.1**.

#[cfg(feature = "serde")]
mod float;
mod parameter;
mod reading;
mod snapshot;
mod version;

pub use parameter::*;
pub use reading::*;
pub use snapshot::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const SCHEMA_VERSION: u32 = 1;
