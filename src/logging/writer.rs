use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use super::logger::Logger;

/// A log sink shared between a fmt layer and the [`Logger`] that flushes it.
#[derive(Clone)]
pub(crate) struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub(crate) fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Box<dyn Write + Send>>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // One event per write_all; keep it under a single lock
        self.lock()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// `io::Write` adapter that emits every complete line as an info event.
///
/// For APIs that only take a writer. A trailing partial line is emitted on
/// `flush` or drop.
pub struct LogWriter {
    logger: Logger,
    buf: Vec<u8>,
}

impl LogWriter {
    pub(crate) fn new(logger: Logger) -> Self {
        Self {
            logger,
            buf: Vec::new(),
        }
    }

    fn emit(&self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return;
        }

        self.logger
            .in_scope(|| tracing::info!(target: "backend_kit::writer", "{}", line));
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            self.emit(&line);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let rest = std::mem::take(&mut self.buf);
            self.emit(&rest);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::{json_logger, Capture};

    #[test]
    fn test_log_writer_splits_lines() {
        let (logger, capture) = json_logger();

        {
            let mut writer = logger.writer();
            write!(writer, "first line\nsecond ").unwrap();
            write!(writer, "line\r\n\npartial").unwrap();
        }

        let messages: Vec<String> = capture
            .lines()
            .iter()
            .map(|l| l["fields"]["message"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(messages, vec!["first line", "second line", "partial"]);
        assert!(capture.lines().iter().all(|l| l["level"] == "INFO"));
    }

    #[test]
    fn test_shared_writer_forwards() {
        let capture = Capture::default();
        let mut writer = SharedWriter::new(capture.clone());
        let mut other = writer.make_writer();

        writer.write_all(b"{\"a\":1}\n").unwrap();
        other.write_all(b"{\"b\":2}\n").unwrap();
        other.flush().unwrap();

        assert_eq!(capture.lines().len(), 2);
    }
}
