use std::convert::Infallible;
use std::fmt;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::config::LogConfig;
use crate::errors::Error;

use super::logger::Logger;
use super::writer::SharedWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output preset for a logger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// Compact, colored console output with source locations
    #[default]
    Development,
    /// One JSON object per line
    Production,
}

impl LogMode {
    /// `prod` and `production` (any ASCII case) select production, anything
    /// else development.
    pub fn parse(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "prod" | "production" => LogMode::Production,
            _ => LogMode::Development,
        }
    }

    pub fn default_level(&self) -> &'static str {
        match self {
            LogMode::Development => "debug",
            LogMode::Production => "info",
        }
    }
}

impl FromStr for LogMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for LogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMode::Development => f.write_str("development"),
            LogMode::Production => f.write_str("production"),
        }
    }
}

/// Development preset: human-readable console output, `debug` and above.
pub fn new_development() -> Result<Logger, Error> {
    LoggerBuilder::new(LogMode::Development).build()
}

/// Production preset: JSON lines on stdout, `info` and above.
pub fn new_production() -> Result<Logger, Error> {
    LoggerBuilder::new(LogMode::Production).build()
}

/// Pick a preset by name, see [`LogMode::parse`].
pub fn new(mode: &str) -> Result<Logger, Error> {
    LoggerBuilder::new(LogMode::parse(mode)).build()
}

/// Assembles a [`Logger`] from a preset plus overrides
pub struct LoggerBuilder {
    mode: LogMode,
    level: Option<String>,
    file: Option<PathBuf>,
    console: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    pub fn new(mode: LogMode) -> Self {
        Self {
            mode,
            level: None,
            file: None,
            console: None,
        }
    }

    pub fn from_config(config: &LogConfig) -> Self {
        Self {
            mode: config.mode,
            level: config.level.clone(),
            file: config.file.clone(),
            console: None,
        }
    }

    /// Filter directive, e.g. `warn` or `info,my_crate=debug`
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Also write JSON lines to `path`, rotated daily
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Replace stdout as the console sink
    pub fn console_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.console = Some(Box::new(writer));
        self
    }

    pub fn build(self) -> Result<Logger, Error> {
        let filter = match &self.level {
            Some(level) => EnvFilter::try_new(level)
                .map_err(|e| Error::InvalidConfig(format!("invalid log level {:?}: {}", level, e)))?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.mode.default_level())),
        };

        // Colors only make sense on a real terminal
        let ansi = self.console.is_none() && std::io::stdout().is_terminal();
        let console = match self.console {
            Some(writer) => SharedWriter::new(writer),
            None => SharedWriter::new(std::io::stdout()),
        };

        let mut sinks = vec![console.clone()];
        let mut layers: Vec<BoxedLayer> = Vec::new();

        // Console layer
        match self.mode {
            LogMode::Development => layers.push(
                tfmt::layer()
                    .with_writer(console)
                    .with_ansi(ansi)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .compact()
                    .boxed(),
            ),
            LogMode::Production => layers.push(
                tfmt::layer()
                    .with_writer(console)
                    .with_ansi(false)
                    .with_target(true)
                    .json()
                    .boxed(),
            ),
        }

        // File layer
        if let Some(path) = &self.file {
            let file = SharedWriter::new(rolling_file(path)?);
            sinks.push(file.clone());
            layers.push(
                tfmt::layer()
                    .with_writer(file)
                    .with_target(true)
                    .with_ansi(false)
                    .json()
                    .boxed(),
            );
        }

        let subscriber = Registry::default().with(layers).with(filter);

        Ok(Logger::from_parts(
            tracing::Dispatch::new(subscriber),
            sinks,
            Some(self.mode),
        ))
    }
}

impl Logger {
    /// Build the logger described by `config`
    pub fn from_config(config: &LogConfig) -> Result<Logger, Error> {
        LoggerBuilder::from_config(config).build()
    }
}

/// Daily-rotated appender; `path`'s file name becomes the rotation prefix.
fn rolling_file(path: &Path) -> Result<RollingFileAppender, Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("app.log");

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(dir)
        .map_err(|e| Error::Logging(format!("failed to open log file {}: {}", path.display(), e)))
}
