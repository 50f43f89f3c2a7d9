use std::fmt;
use std::future::Future;
use std::io;
use std::sync::Arc;

use tracing::instrument::{Instrumented, WithDispatch, WithSubscriber};
use tracing::{dispatcher, Dispatch, Instrument, Span};

use super::presets::LogMode;
use super::sync::is_benign_sync_error;
use super::writer::{LogWriter, SharedWriter};

/// Handle to a configured subscriber plus the span holding attached fields.
///
/// Cloning is cheap; clones share the subscriber and its sinks.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    span: Span,
    sinks: Arc<[SharedWriter]>,
    mode: Option<LogMode>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("mode", &self.mode)
            .field("span", &self.span)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Logger {
    pub(crate) fn from_parts(dispatch: Dispatch, sinks: Vec<SharedWriter>, mode: Option<LogMode>) -> Self {
        Self {
            dispatch,
            span: Span::none(),
            sinks: sinks.into(),
            mode,
        }
    }

    /// A logger that drops everything
    pub fn noop() -> Self {
        Self::from_parts(Dispatch::none(), Vec::new(), None)
    }

    /// Preset this logger was built from; `None` for [`Logger::noop`]
    pub fn mode(&self) -> Option<LogMode> {
        self.mode
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the default subscriber and its span entered.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, || self.span.in_scope(f))
    }

    /// Derive a logger whose events carry the fields of `make_span`'s span.
    ///
    /// The span is created inside this logger's scope, so it nests under any
    /// fields already attached:
    ///
    /// ```no_run
    /// # let logger = backend_kit::logging::new_production().unwrap();
    /// let job = logger.child(|| tracing::info_span!("job", job_id = 42));
    /// job.in_scope(|| tracing::info!("started"));
    /// ```
    pub fn child(&self, make_span: impl FnOnce() -> Span) -> Logger {
        let span = self.in_scope(make_span);

        Logger {
            span,
            ..self.clone()
        }
    }

    /// Attach request metadata. Empty values are left off.
    pub fn with_request(&self, request_id: &str, client_ip: &str) -> Logger {
        if request_id.is_empty() && client_ip.is_empty() {
            return self.clone();
        }

        self.child(|| {
            let span = tracing::info_span!(
                "request",
                request_id = tracing::field::Empty,
                client_ip = tracing::field::Empty
            );
            if !request_id.is_empty() {
                span.record("request_id", request_id);
            }
            if !client_ip.is_empty() {
                span.record("client_ip", client_ip);
            }
            span
        })
    }

    /// Wrap a future so everything it logs goes through this logger.
    pub fn instrument<F: Future>(&self, fut: F) -> WithDispatch<Instrumented<F>> {
        fut.instrument(self.span.clone())
            .with_subscriber(self.dispatch.clone())
    }

    /// Line-oriented writer that logs at info level
    pub fn writer(&self) -> LogWriter {
        LogWriter::new(self.clone())
    }

    /// Flush every sink, ignoring errors that non-seekable outputs such as
    /// terminals and pipes report on flush.
    pub fn sync(&self) -> io::Result<()> {
        let mut first_err = None;

        for sink in self.sinks.iter() {
            let mut sink = sink.clone();
            if let Err(e) = io::Write::flush(&mut sink) {
                if is_benign_sync_error(&e) {
                    continue;
                }
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}
