//! Error types for the monitor's outer surfaces.
//!
//! Stepping the aggregator never fails; these errors come from
//! configuration, source validation and trace input.

use thiserror::Error;

/// Errors that can occur around the cycle monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A configured source path is not exposed by the host model.
    #[error("Unresolved source: {model}.{prop} is not exposed by the model")]
    UnresolvedSource { model: String, prop: String },

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A trace frame could not be parsed.
    #[error("Failed to parse frame on line {line}: {message}")]
    Frame { line: usize, message: String },

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for MonitorError {
    fn from(err: config::ConfigError) -> Self {
        MonitorError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = MonitorError::UnresolvedSource {
            model: "LV".to_string(),
            prop: "pres".to_string(),
        };
        assert_eq!(err.to_string(), "Unresolved source: LV.pres is not exposed by the model");

        let err = MonitorError::Frame {
            line: 3,
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse frame on line 3: expected value");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: MonitorError = config::ConfigError::Message("bad interval".to_string()).into();
        assert!(matches!(err, MonitorError::Config(ref m) if m.contains("bad interval")));
    }
}
