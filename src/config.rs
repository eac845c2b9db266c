//! Monitor configuration.
//!
//! Settings are layered: defaults, then an optional file (TOML, JSON or
//! YAML, chosen by extension), then `CYCLE_MONITOR__*` environment
//! variables, e.g. `CYCLE_MONITOR__BACKUP_INTERVAL=2.5` or
//! `CYCLE_MONITOR__TRIGGER__MODEL=Heart`.
//!
//! ```toml
//! backup_interval = 5.0
//!
//! [trigger]
//! model = "ECG"
//! prop = "ncc_ventricular"
//!
//! [[parameters]]
//! model = "LV_AA"
//! prop = "flow"
//! type = "flow"
//! decimals = 2
//! ```

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vitals_types::ParameterSpec;

use crate::data::{CycleAggregator, TriggerSource, DEFAULT_BACKUP_INTERVAL};
use crate::error::MonitorError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CYCLE_MONITOR";

/// Log verbosity.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` takes precedence when set.
    pub level: LogLevel,
}

/// Complete monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Run the aggregator on every tick.
    pub enabled: bool,
    /// Simulated time without a contraction before a backup flush.
    pub backup_interval: f64,
    /// Property that marks the start of a cycle.
    pub trigger: TriggerSource,
    /// Monitored quantities, in display order.
    pub parameters: Vec<ParameterSpec>,
    pub logging: LoggingConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backup_interval: DEFAULT_BACKUP_INTERVAL,
            trigger: TriggerSource::default(),
            parameters: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self, MonitorError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config: MonitorConfig = builder
            .add_source(Environment::with_prefix(prefix).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check the settings the aggregator cannot work without.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.backup_interval.is_finite() || self.backup_interval <= 0.0 {
            return Err(MonitorError::Config(format!(
                "backup_interval must be a positive number, got {}",
                self.backup_interval
            )));
        }

        if self.trigger.model.is_empty() || self.trigger.prop.is_empty() {
            return Err(MonitorError::Config(
                "trigger needs both a model and a prop".to_string(),
            ));
        }

        if let Some(spec) = self
            .parameters
            .iter()
            .find(|p| p.model.is_empty() || p.prop.is_empty())
        {
            return Err(MonitorError::Config(format!(
                "parameter '{}' needs both a model and a prop",
                spec.label()
            )));
        }

        Ok(())
    }

    /// Create an aggregator for these settings.
    pub fn build_aggregator(&self) -> CycleAggregator {
        CycleAggregator::new(self.parameters.iter().cloned())
            .with_trigger(self.trigger.clone())
            .with_backup_interval(self.backup_interval)
    }

    /// Install the global tracing subscriber, writing to stderr.
    pub fn init_logging(&self) -> Result<(), MonitorError> {
        let level = Level::from(self.logging.level);
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| MonitorError::Config(format!("logging already initialized: {}", e)))
    }
}
