use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

// ---------------------------------------------------------------------------
// LogContext – the logging handle passed into every stage
// ---------------------------------------------------------------------------

/// Named logging handle. Stages log with `target: log.name()` so every
/// line carries the logger name regardless of which module emitted it.
#[derive(Debug, Clone)]
pub struct LogContext {
    name: String,
}

impl LogContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Tee sink: console + log file
// ---------------------------------------------------------------------------

/// Duplicates every formatted log line to stderr and to a file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Logger builder with the line format and level filters, without a sink.
///
/// Records targeted at `name` pass from `Debug` up; everything else
/// (HTTP client internals, ...) only from `Warn`.
fn builder(name: &str) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(name, LevelFilter::Debug)
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                buf.timestamp_millis(),
                record.target(),
                record.level(),
                record.args()
            )
        });
    builder
}

/// Install the global logger for the logger `name`.
///
/// Lines look like `<timestamp> - <logger_name> - <level> - <message>` and go
/// to both stderr and `log_path` (appended). `RUST_LOG` overrides the levels.
pub fn init(name: &str, log_path: &Path) -> Result<()> {
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    builder(name)
        .parse_default_env()
        .target(Target::Pipe(Box::new(Tee { file })))
        .try_init()
        .context("installing logger")?;

    Ok(())
}
