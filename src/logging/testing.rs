use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::{LogMode, Logger, LoggerBuilder};

/// In-memory console sink for asserting on emitted JSON lines.
#[derive(Clone, Default)]
pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub(crate) fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub(crate) fn lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) fn json_logger() -> (Logger, Capture) {
    let capture = Capture::default();
    let logger = LoggerBuilder::new(LogMode::Production)
        .level("info")
        .console_writer(capture.clone())
        .build()
        .unwrap();
    (logger, capture)
}
