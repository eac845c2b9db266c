//! Tick driver and published-statistics handle.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::{debug, warn};
use vitals_types::{ParameterReading, Snapshot};

use crate::data::CycleAggregator;
use crate::source::FrameSource;

/// How long [`App::run`] waits before polling an open but empty source again.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of one call to [`App::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickStatus {
    /// No frame was available.
    Idle,
    /// A frame was consumed while the monitor is disabled.
    Skipped,
    /// A frame was sampled and no cycle ended.
    Sampled,
    /// A cycle ended on this tick; carries the published statistics.
    Flushed(Snapshot),
}

/// Read-only access to the latest published statistics.
///
/// Handles are cheap to clone and can be moved to a display thread. They
/// only ever see complete snapshots; the aggregator's live state is never
/// shared.
///
/// # Example
///
/// ```
/// use cycle_monitor::{App, ChannelSource, CycleAggregator};
///
/// let (_tx, source) = ChannelSource::create("engine");
/// let app = App::new(Box::new(source), CycleAggregator::new([]));
/// let handle = app.handle();
/// assert!(handle.latest().is_none());
/// ```
#[derive(Clone, Default)]
pub struct VitalsHandle {
    latest: Arc<RwLock<Option<Snapshot>>>,
}

impl VitalsHandle {
    /// The most recent snapshot, if any cycle has ended yet.
    pub fn latest(&self) -> Option<Snapshot> {
        self.latest.read().clone()
    }

    /// The latest reading for one source.
    pub fn reading(&self, model: &str, prop: &str) -> Option<ParameterReading> {
        self.latest.read().as_ref()?.get(model, prop).cloned()
    }

    /// Number of cycles published so far.
    pub fn cycles(&self) -> u64 {
        self.latest.read().as_ref().map_or(0, |s| s.cycle)
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        *self.latest.write() = Some(snapshot);
    }
}

impl fmt::Debug for VitalsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VitalsHandle")
            .field("cycles", &self.cycles())
            .finish()
    }
}

/// Drives a [`CycleAggregator`] from a [`FrameSource`], one frame per tick.
pub struct App {
    /// When false, frames are consumed without touching the aggregator.
    pub enabled: bool,
    pub load_error: Option<String>,

    source: Box<dyn FrameSource>,
    aggregator: CycleAggregator,
    handle: VitalsHandle,
    ticks: u64,
}

impl App {
    /// Create a new App with the given frame source and aggregator.
    pub fn new(source: Box<dyn FrameSource>, aggregator: CycleAggregator) -> Self {
        Self {
            enabled: true,
            load_error: None,
            source,
            aggregator,
            handle: VitalsHandle::default(),
            ticks: 0,
        }
    }

    /// Returns a description of the current frame source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The source's last error, if any.
    pub fn source_error(&self) -> Option<&str> {
        self.source.error()
    }

    /// A handle for reading published statistics.
    pub fn handle(&self) -> VitalsHandle {
        self.handle.clone()
    }

    pub fn aggregator(&self) -> &CycleAggregator {
        &self.aggregator
    }

    /// Number of frames consumed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Consume at most one frame and step the aggregator with it.
    pub fn tick(&mut self) -> TickStatus {
        let Some(frame) = self.source.poll() else {
            self.load_error = self.source.error().map(str::to_string);
            return TickStatus::Idle;
        };

        if self.ticks == 0 {
            if let Err(e) = self.aggregator.validate(&frame) {
                warn!(source = %self.source.description(), "{}", e);
            }
        }
        self.ticks += 1;

        if !self.enabled {
            self.aggregator.step(&frame, false);
            return TickStatus::Skipped;
        }

        let cycles = self.aggregator.cycles();
        self.aggregator.step(&frame, true);

        if self.aggregator.cycles() > cycles {
            let snapshot = self.aggregator.snapshot();
            self.handle.publish(snapshot.clone());
            TickStatus::Flushed(snapshot)
        } else {
            TickStatus::Sampled
        }
    }

    /// Tick until the source is finished, calling `on_flush` for every ended cycle.
    ///
    /// Returns the number of frames consumed. With a source that is never
    /// finished (an open channel) this keeps polling, sleeping
    /// [`IDLE_POLL_INTERVAL`] whenever no frame is waiting.
    pub fn run<F>(&mut self, mut on_flush: F) -> u64
    where
        F: FnMut(&Snapshot),
    {
        let start = self.ticks;
        loop {
            match self.tick() {
                TickStatus::Flushed(snapshot) => on_flush(&snapshot),
                TickStatus::Idle if self.source.is_finished() => break,
                TickStatus::Idle => std::thread::sleep(IDLE_POLL_INTERVAL),
                TickStatus::Skipped | TickStatus::Sampled => {}
            }
        }

        debug!(
            ticks = self.ticks - start,
            cycles = self.aggregator.cycles(),
            "source finished"
        );
        self.ticks - start
    }

    /// Export the latest published snapshot to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(snapshot) = self.handle.latest() else {
            anyhow::bail!("No cycle has been published yet");
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
