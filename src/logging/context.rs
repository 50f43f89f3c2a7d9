use std::future::Future;

use super::global::global;
use super::logger::Logger;

tokio::task_local! {
    static TASK_LOGGER: Logger;
}

/// Run `fut` with `logger` as the task's logger.
///
/// Inside, [`current`] returns `logger` and bare `tracing` macros go
/// through it as well.
pub async fn scope<F: Future>(logger: Logger, fut: F) -> F::Output {
    let fut = logger.instrument(fut);
    TASK_LOGGER.scope(logger, fut).await
}

/// The task's logger if one was set with [`scope`], otherwise the global.
pub fn current() -> Logger {
    TASK_LOGGER
        .try_with(Logger::clone)
        .unwrap_or_else(|_| global())
}

/// Run `fut` with the current logger annotated with `request_id` and
/// `client_ip`. Empty values are not attached.
pub async fn attach_request<F: Future>(request_id: &str, client_ip: &str, fut: F) -> F::Output {
    let logger = current().with_request(request_id, client_ip);
    scope(logger, fut).await
}

/// Log `msg` at error level with `err` attached as the `error` field.
pub fn log_error<E>(logger: &Logger, err: &E, msg: &str)
where
    E: std::error::Error + ?Sized,
{
    logger.in_scope(|| tracing::error!(error = %err, "{}", msg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::json_logger;
    use std::io;

    #[tokio::test]
    async fn test_scope_overrides_current() {
        let (logger, capture) = json_logger();

        scope(logger, async {
            current().in_scope(|| tracing::info!("via current"));
            tracing::info!("via bare macro");
        })
        .await;

        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["fields"]["message"], "via current");
        assert_eq!(lines[1]["fields"]["message"], "via bare macro");
    }

    #[tokio::test]
    async fn test_attach_request_fields() {
        let (logger, capture) = json_logger();

        scope(logger, async {
            attach_request("req-123", "10.0.0.1", async {
                current().in_scope(|| tracing::info!("handled"));
            })
            .await;
        })
        .await;

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["span"]["request_id"], "req-123");
        assert_eq!(lines[0]["span"]["client_ip"], "10.0.0.1");
    }

    #[tokio::test]
    async fn test_attach_request_skips_empty_values() {
        let (logger, capture) = json_logger();

        scope(logger, async {
            attach_request("req-9", "", async {
                tracing::info!("partial");
            })
            .await;
            attach_request("", "", async {
                tracing::info!("bare");
            })
            .await;
        })
        .await;

        let lines = capture.lines();
        assert_eq!(lines[0]["span"]["request_id"], "req-9");
        assert!(lines[0]["span"].get("client_ip").is_none());
        assert!(lines[1].get("span").is_none());
    }

    #[test]
    fn test_log_error_attaches_error_field() {
        let (logger, capture) = json_logger();
        let err = io::Error::other("connection reset");

        log_error(&logger, &err, "upstream call failed");

        let lines = capture.lines();
        assert_eq!(lines[0]["level"], "ERROR");
        assert_eq!(lines[0]["fields"]["message"], "upstream call failed");
        assert_eq!(lines[0]["fields"]["error"], "connection reset");
    }

    #[test]
    fn test_child_nests_fields() {
        let (logger, capture) = json_logger();
        let job = logger
            .with_request("req-1", "")
            .child(|| tracing::info_span!("job", job_id = 7));

        job.in_scope(|| tracing::info!("running"));

        let lines = capture.lines();
        assert_eq!(lines[0]["span"]["name"], "job");
        assert_eq!(lines[0]["span"]["job_id"], 7);
        let spans = lines[0]["spans"].as_array().unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0]["request_id"], "req-1");
    }
}
