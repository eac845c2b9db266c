use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cycle_monitor::vitals_types::Snapshot;
use cycle_monitor::{App, LogLevel, MonitorConfig, TraceFile};

#[derive(Parser, Debug)]
#[command(name = "cycle-monitor")]
#[command(about = "Replay a simulation trace and report per-cycle vital-sign statistics")]
#[command(version)]
struct Args {
    /// JSON-lines trace, one model frame per tick
    #[arg(short, long)]
    trace: PathBuf,

    /// Configuration file (TOML, JSON or YAML) listing the monitored parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write one JSON snapshot per cycle to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Simulated time without a contraction before a backup flush
    #[arg(long)]
    backup_interval: Option<f64>,

    /// Consume the trace without aggregating
    #[arg(long)]
    disabled: bool,

    /// Log level (RUST_LOG overrides)
    #[arg(short, long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = MonitorConfig::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(interval) = args.backup_interval {
        config.backup_interval = interval;
        config.validate()?;
    }
    if args.disabled {
        config.enabled = false;
    }
    config.init_logging()?;

    if config.parameters.is_empty() {
        warn!("no parameters configured, snapshots will be empty");
    }

    let mut app = App::new(Box::new(TraceFile::new(&args.trace)), config.build_aggregator());
    app.enabled = config.enabled;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut write_error = None;
    let ticks = app.run(|snapshot| {
        if write_error.is_none() {
            write_error = write_snapshot(&mut writer, snapshot).err();
        }
    });
    if let Some(e) = write_error {
        return Err(e.context("writing snapshots"));
    }
    writer.flush()?;

    if let Some(err) = app.source_error() {
        warn!(source = %app.source_description(), "{}", err);
    }

    info!(
        ticks,
        cycles = app.aggregator().cycles(),
        simulated = app.aggregator().clock(),
        source = %app.source_description(),
        "replay finished"
    );
    Ok(())
}

/// Write a snapshot as one JSON line.
fn write_snapshot(writer: &mut dyn Write, snapshot: &Snapshot) -> Result<()> {
    serde_json::to_writer(&mut *writer, snapshot)?;
    writeln!(writer)?;
    Ok(())
}
