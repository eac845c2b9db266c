//! Channel-based frame source.
//!
//! Receives host-model frames via a tokio mpsc channel. This is useful when
//! the simulation engine runs in the same process and pushes a frame after
//! every tick instead of writing a trace.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::{FrameSource, ModelFrame};

/// A frame source fed through an unbounded channel.
///
/// Every frame sent is delivered exactly once and in order. Polling never
/// blocks and needs no async runtime.
///
/// # Example
///
/// ```
/// use cycle_monitor::{ChannelSource, FrameSource, ModelFrame};
///
/// let (tx, mut source) = ChannelSource::create("engine");
/// tx.send(ModelFrame::new(0.0005)).unwrap();
/// assert!(source.poll().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<ModelFrame>,
    description: String,
    last_error: Option<String>,
    finished: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of an unbounded channel
    /// * `source_description` - A description of the producing engine
    pub fn new(receiver: mpsc::UnboundedReceiver<ModelFrame>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            last_error: None,
            finished: false,
        }
    }

    /// Create a channel pair for pushing frames to a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<ModelFrame>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl FrameSource for ChannelSource {
    fn poll(&mut self) -> Option<ModelFrame> {
        match self.receiver.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.finished {
                    self.finished = true;
                    self.last_error = Some("Channel closed: all senders dropped".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ModelState;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // Nothing sent yet
        assert!(source.poll().is_none());
        assert!(!source.is_finished());

        tx.send(ModelFrame::new(0.01).with("AA", "pres", 60.0)).unwrap();
        tx.send(ModelFrame::new(0.01).with("AA", "pres", 61.0)).unwrap();

        let first = source.poll().unwrap();
        let second = source.poll().unwrap();
        assert_eq!(first.property("AA", "pres"), Some(60.0));
        assert_eq!(second.property("AA", "pres"), Some(61.0));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_drains_before_disconnect() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(ModelFrame::new(0.01)).unwrap();
        drop(tx);

        assert!(source.poll().is_some());
        assert!(source.poll().is_none());
        assert!(source.is_finished());
        assert!(source.error().unwrap().contains("Channel closed"));
    }
}
