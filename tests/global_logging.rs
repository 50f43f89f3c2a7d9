use std::fs;

use backend_kit::config::LogConfig;
use backend_kit::logging::{self, LogMode};
use backend_kit::Error;

/// Installs the process-wide subscriber, so everything global lives in one test.
#[test]
fn test_init_replace_and_restore_globals() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::new(LogMode::Production)
        .with_level("info")
        .with_file(dir.path().join("logs").join("app.log"));

    // Nothing installed yet
    assert_eq!(logging::global().mode(), None);
    assert_eq!(logging::current().mode(), None);

    let logger = logging::init(&config).unwrap();
    assert_eq!(logging::global().mode(), Some(LogMode::Production));

    tracing::info!(user_id = 17, "refresh token issued");
    tracing::debug!("filtered out at info");
    logging::sync(Some(&logger)).unwrap();

    let log_dir = dir.path().join("logs");
    let file = fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("app.log"))
        })
        .expect("rolling log file created");

    let lines: Vec<serde_json::Value> = fs::read_to_string(file)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    let issued = lines
        .iter()
        .find(|l| l["fields"]["message"] == "refresh token issued")
        .expect("event written to file");
    assert_eq!(issued["level"], "INFO");
    assert_eq!(issued["fields"]["user_id"], 17);
    assert!(lines
        .iter()
        .all(|l| l["fields"]["message"] != "filtered out at info"));

    // The tracing default can only be set once
    assert!(matches!(logging::init(&config), Err(Error::Logging(_))));

    // Swap in a development logger, then restore
    {
        let dev = logging::new_development().unwrap();
        let _restore = logging::replace_globals(dev);
        assert_eq!(logging::global().mode(), Some(LogMode::Development));
        assert_eq!(logging::current().mode(), Some(LogMode::Development));
    }
    assert_eq!(logging::global().mode(), Some(LogMode::Production));
}
