use std::io;

use crate::errors::Error;

use super::logger::Logger;

/// Flush `logger`'s outputs. Call at shutdown.
///
/// `None` is accepted so shutdown paths need not care whether logging was
/// ever set up.
pub fn sync(logger: Option<&Logger>) -> Result<(), Error> {
    match logger {
        Some(logger) => logger.sync().map_err(Error::from),
        None => Ok(()),
    }
}

/// EINVAL and ENOTTY come back from flushing stdout/stderr when they are a
/// pipe or terminal. Wrapped I/O errors are unwrapped first.
pub fn is_benign_sync_error(err: &io::Error) -> bool {
    if let Some(code) = err.raw_os_error() {
        return is_benign_code(code);
    }

    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<io::Error>())
        .map(is_benign_sync_error)
        .unwrap_or(false)
}

#[cfg(unix)]
fn is_benign_code(code: i32) -> bool {
    code == libc::EINVAL || code == libc::ENOTTY
}

#[cfg(not(unix))]
fn is_benign_code(_code: i32) -> bool {
    false
}
