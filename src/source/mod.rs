//! Frame source abstraction for driving the monitor tick by tick.
//!
//! This module provides a trait-based abstraction for receiving host-model
//! frames from various sources (recorded trace files, in-process channels).

mod channel;
mod file;
mod frame;

pub use channel::ChannelSource;
pub use file::TraceFile;
pub use frame::{ComponentProps, ModelFrame};

use std::fmt::Debug;

/// Trait for receiving one host-model frame per simulation tick.
///
/// # Example
///
/// ```
/// use cycle_monitor::{FrameSource, TraceFile};
///
/// let mut source = TraceFile::new("trace.jsonl");
/// while let Some(frame) = source.poll() {
///     println!("stepsize {}", frame.modeling_stepsize);
/// }
/// ```
pub trait FrameSource: Send + Debug {
    /// Poll for the next frame.
    ///
    /// Returns `Some(frame)` if a frame is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<ModelFrame>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the last error encountered while polling, if any.
    fn error(&self) -> Option<&str>;

    /// Check if the source will never yield another frame.
    fn is_finished(&self) -> bool {
        false
    }
}
