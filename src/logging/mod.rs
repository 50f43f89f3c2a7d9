//! Structured logging façade over `tracing`.
//!
//! Two presets ([`new_development`], [`new_production`]) cover most services.
//! A [`Logger`] is a cheap handle: clone it freely, derive children with
//! extra fields, and hand it to tasks through [`scope`]. Code that has no
//! handle calls [`current`], which falls back to the process-wide logger
//! installed with [`replace_globals`] or [`init`].

pub mod context;
pub mod global;
pub mod logger;
pub mod presets;
pub mod sync;
pub mod writer;

#[cfg(test)]
mod testing;

pub use context::{attach_request, current, log_error, scope};
pub use global::{global, init, replace_globals, RestoreGlobals};
pub use logger::Logger;
pub use presets::{new, new_development, new_production, LogMode, LoggerBuilder};
pub use sync::{is_benign_sync_error, sync};
pub use writer::LogWriter;
