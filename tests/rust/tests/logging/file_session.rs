//! File session lifecycle tests

use responsum_logging::FileSinkState;
use tempfile::TempDir;
use tests::{file_logger, test_logger};
use tokio_util::sync::CancellationToken;

fn session_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

#[tokio::test]
async fn test_backlog_drains_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let (logger, _) = file_logger(temp_dir.path());

    logger.info("L1", ());
    logger.info("L2", ());
    logger.info("L3", ());

    // "Logging to file" plus the three lines
    assert_eq!(logger.flush_file().await, 4);
    assert_eq!(logger.pending_file_lines(), 0);

    let files = session_files(temp_dir.path());
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("responsum-api-example_"));
    assert!(name.ends_with(".log"));

    let content = std::fs::read_to_string(&files[0]).unwrap();
    assert!(content.starts_with("Starting log session for responsum-api-example\r\n"));
    let l1 = content.find("[info] L1\r\n").unwrap();
    let l2 = content.find("[info] L2\r\n").unwrap();
    let l3 = content.find("[info] L3\r\n").unwrap();
    assert!(l1 < l2 && l2 < l3);
}

#[tokio::test]
async fn test_lines_only_reach_the_file_after_a_flush() {
    let temp_dir = TempDir::new().unwrap();
    let (logger, _) = file_logger(temp_dir.path());
    let path = session_files(temp_dir.path()).remove(0);

    logger.info("pending", ());
    assert!(!std::fs::read_to_string(&path).unwrap().contains("pending"));

    logger.flush_file().await;
    assert!(std::fs::read_to_string(&path).unwrap().contains("[info] pending"));
}

#[tokio::test]
async fn test_unconfigured_file_sink() {
    let (logger, _) = test_logger();
    logger.info("memory and console only", ());

    assert!(matches!(logger.file_state(), FileSinkState::Unconfigured));
    assert_eq!(logger.pending_file_lines(), 0);
    assert_eq!(logger.flush_file().await, 0);
    assert!(logger.spawn_file_flusher(CancellationToken::new()).is_none());
}

#[tokio::test]
async fn test_flusher_final_drain() {
    let temp_dir = TempDir::new().unwrap();
    let (logger, _) = file_logger(temp_dir.path());
    let shutdown = CancellationToken::new();
    let flusher = logger.spawn_file_flusher(shutdown.clone()).unwrap();

    logger.warn("last words", ());
    shutdown.cancel();
    flusher.await.unwrap();

    let content = std::fs::read_to_string(session_files(temp_dir.path()).remove(0)).unwrap();
    assert!(content.contains("[warn] last words\r\n"));
}

#[tokio::test]
async fn test_periodic_flush() {
    let temp_dir = TempDir::new().unwrap();
    let (console, _) = responsum_logging::ConsoleSink::capture();
    let config = responsum_logging::LoggerConfig {
        log_dir: Some(temp_dir.path().to_path_buf()),
        flush_interval: std::time::Duration::from_millis(200),
        ..Default::default()
    };
    let logger = std::sync::Arc::new(responsum_logging::AppLogger::with_console(config, console));
    let shutdown = CancellationToken::new();
    let flusher = logger.spawn_file_flusher(shutdown.clone()).unwrap();

    logger.info("tick", ());
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        if logger.pending_file_lines() == 0 {
            break;
        }
    }
    assert_eq!(logger.pending_file_lines(), 0);

    shutdown.cancel();
    flusher.await.unwrap();
}

#[tokio::test]
async fn test_failed_flush_warns_and_next_flush_recovers() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");
    std::fs::create_dir(&log_dir).unwrap();
    let (logger, console) = file_logger(&log_dir);
    let path = session_files(&log_dir).remove(0);

    std::fs::remove_dir_all(&log_dir).unwrap();
    logger.info("lost", ());
    assert_eq!(logger.flush_file().await, 0);
    assert_eq!(logger.pending_file_lines(), 0);
    assert!(console.contents().contains("[warn] Failed to flush log file"));
    assert!(!logger.get_log_memory().iter().any(|l| l.contains("Failed to flush")));

    std::fs::create_dir(&log_dir).unwrap();
    logger.info("found", ());
    assert_eq!(logger.flush_file().await, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[info] found\r\n"));
    assert!(!content.contains("lost"));
}

#[tokio::test]
async fn test_flusher_survives_a_failed_tick() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");
    std::fs::create_dir(&log_dir).unwrap();
    let (console, capture) = responsum_logging::ConsoleSink::capture();
    let config = responsum_logging::LoggerConfig {
        log_dir: Some(log_dir.clone()),
        flush_interval: std::time::Duration::from_millis(50),
        ..Default::default()
    };
    let logger = std::sync::Arc::new(responsum_logging::AppLogger::with_console(config, console));
    let path = session_files(&log_dir).remove(0);
    let shutdown = CancellationToken::new();
    let flusher = logger.spawn_file_flusher(shutdown.clone()).unwrap();

    std::fs::remove_dir_all(&log_dir).unwrap();
    logger.info("lost", ());
    for _ in 0..100 {
        if capture.contents().contains("Failed to flush log file") {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert!(capture.contents().contains("[warn] Failed to flush log file"));

    std::fs::create_dir(&log_dir).unwrap();
    logger.info("found", ());
    for _ in 0..100 {
        if std::fs::read_to_string(&path).is_ok_and(|c| c.contains("found")) {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert!(!flusher.is_finished());
    assert!(std::fs::read_to_string(&path).unwrap().contains("[info] found\r\n"));

    shutdown.cancel();
    flusher.await.unwrap();
}
