use std::path::PathBuf;

use crate::logging::LogMode;

use super::{environment, non_empty};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub mode: LogMode,
    /// Filter directive overriding the preset level, e.g. `info,hyper=warn`.
    pub level: Option<String>,
    /// JSON log file, rotated daily. Console only when unset.
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(mode: LogMode) -> Self {
        Self {
            mode,
            level: None,
            file: None,
        }
    }

    pub fn from_env() -> Result<Self, config::ConfigError> {
        let cfg = environment()?;

        // LOG_MODE wins over the service-wide ENVIRONMENT
        let mode = non_empty(cfg.get_string("LOG_MODE").ok())
            .or_else(|| non_empty(cfg.get_string("ENVIRONMENT").ok()))
            .map(|m| LogMode::parse(&m))
            .unwrap_or_default();

        Ok(Self {
            mode,
            level: non_empty(cfg.get_string("LOG_LEVEL").ok()),
            file: non_empty(cfg.get_string("LOG_FILE").ok()).map(PathBuf::from),
        })
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_production(&self) -> bool {
        self.mode == LogMode::Production
    }
}
