use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::config::LogConfig;
use crate::errors::Error;

use super::logger::Logger;

static GLOBAL: Lazy<RwLock<Logger>> = Lazy::new(|| RwLock::new(Logger::noop()));

/// The process-wide logger. A no-op logger until one is installed.
pub fn global() -> Logger {
    match GLOBAL.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn swap(logger: Logger) -> Logger {
    let mut guard = match GLOBAL.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    std::mem::replace(&mut *guard, logger)
}

/// Install `logger` as the process-wide logger.
///
/// The previous logger comes back when the returned guard drops:
///
/// ```no_run
/// let logger = backend_kit::logging::new_production().unwrap();
/// let _restore = backend_kit::logging::replace_globals(logger);
/// ```
pub fn replace_globals(logger: Logger) -> RestoreGlobals {
    RestoreGlobals {
        previous: Some(swap(logger)),
    }
}

/// Restores the previous global logger on drop
#[must_use = "dropping the guard immediately restores the previous logger"]
pub struct RestoreGlobals {
    previous: Option<Logger>,
}

impl RestoreGlobals {
    /// Leave the new logger installed for the rest of the process
    pub fn keep(mut self) {
        self.previous = None;
    }
}

impl Drop for RestoreGlobals {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            swap(previous);
        }
    }
}

/// Build a logger from `config` and install it everywhere: as the crate
/// global and as the `tracing` default, so plain `tracing::info!` calls on
/// any thread reach it. Call once from `main`.
pub fn init(config: &LogConfig) -> Result<Logger, Error> {
    let logger = Logger::from_config(config)?;

    tracing::dispatcher::set_global_default(logger.dispatch().clone())
        .map_err(|e| Error::Logging(format!("global subscriber already set: {}", e)))?;
    replace_globals(logger.clone()).keep();

    tracing::info!(
        mode = %config.mode,
        filter = config.level.as_deref().unwrap_or(config.mode.default_level()),
        "Logging initialized"
    );

    Ok(logger)
}
