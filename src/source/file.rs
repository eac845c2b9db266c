//! Trace-file frame source.
//!
//! Replays a recorded simulation run stored as JSON lines, one frame per tick.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{FrameSource, ModelFrame};
use crate::error::MonitorError;

/// A frame source that reads a JSON-lines trace file.
///
/// The file is opened on the first poll and read lazily, one line per
/// frame. Blank lines are skipped. A line that fails to parse is recorded
/// as the source error and skipped, so one corrupt tick does not end the
/// replay.
#[derive(Debug)]
pub struct TraceFile {
    path: PathBuf,
    description: String,
    lines: Option<Lines<BufReader<File>>>,
    line_number: usize,
    last_error: Option<String>,
    finished: bool,
}

impl TraceFile {
    /// Create a new trace source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("trace: {}", path.display());
        Self {
            path,
            description,
            lines: None,
            line_number: 0,
            last_error: None,
            finished: false,
        }
    }

    /// Returns the path being replayed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn open(&mut self) -> Option<()> {
        if self.lines.is_none() {
            match File::open(&self.path) {
                Ok(file) => self.lines = Some(BufReader::new(file).lines()),
                Err(e) => {
                    self.fail(format!("Read error: {}", MonitorError::from(e)));
                    return None;
                }
            }
        }
        Some(())
    }

    fn fail(&mut self, message: String) {
        warn!(source = %self.description, "{}", message);
        self.last_error = Some(message);
        self.finished = true;
    }
}

impl FrameSource for TraceFile {
    fn poll(&mut self) -> Option<ModelFrame> {
        if self.finished {
            return None;
        }
        self.open()?;

        loop {
            let next = self.lines.as_mut()?.next();
            let line = match next {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.fail(format!("Read error: {}", MonitorError::from(e)));
                    return None;
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ModelFrame>(&line) {
                Ok(frame) => return Some(frame),
                Err(e) => {
                    let err = MonitorError::Frame {
                        line: self.line_number,
                        message: e.to_string(),
                    };
                    warn!(source = %self.description, "{}, skipping", err);
                    self.last_error = Some(format!("Parse error: {}", err));
                }
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
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn frame_line(pres: f64, contraction: u8) -> String {
        format!(
            r#"{{"modeling_stepsize":0.5,"components":{{"AA":{{"pres":{}}},"ECG":{{"ncc_ventricular":{}}}}}}}"#,
            pres, contraction
        )
    }

    #[test]
    fn test_trace_file_new() {
        let source = TraceFile::new("/tmp/trace.jsonl");
        assert_eq!(source.path(), Path::new("/tmp/trace.jsonl"));
        assert_eq!(source.description(), "trace: /tmp/trace.jsonl");
        assert!(source.error().is_none());
        assert!(!source.is_finished());
    }

    #[test]
    fn test_trace_file_yields_frames_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", frame_line(60.0, 0)).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}", frame_line(72.5, 1)).unwrap();

        let mut source = TraceFile::new(file.path());

        let first = source.poll().unwrap();
        assert_eq!(first.property("AA", "pres"), Some(60.0));

        let second = source.poll().unwrap();
        assert_eq!(second.property("AA", "pres"), Some(72.5));
        assert_eq!(second.property("ECG", "ncc_ventricular"), Some(1.0));
        assert_eq!(source.line_number(), 3);

        assert!(source.poll().is_none());
        assert!(source.is_finished());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_trace_file_skips_invalid_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", frame_line(60.0, 0)).unwrap();
        writeln!(file, "not valid json").unwrap();
        writeln!(file, "{}", frame_line(61.0, 0)).unwrap();

        let mut source = TraceFile::new(file.path());
        assert!(source.poll().is_some());

        let frame = source.poll().unwrap();
        assert_eq!(frame.property("AA", "pres"), Some(61.0));

        let error = source.error().unwrap();
        assert!(error.contains("Parse error"));
        assert!(error.contains("line 2"));
    }

    #[test]
    fn test_trace_file_missing_file() {
        let mut source = TraceFile::new("/nonexistent/path/trace.jsonl");

        assert!(source.poll().is_none());
        assert!(source.is_finished());
        assert!(source.error().unwrap().contains("Read error"));
    }
}
