//! AppLogger facade tests

use responsum_logging::{ErrorInfo, Fields, LogLevel, LogOptions, SharedValue};
use tests::{last_log_line, test_logger};

#[test]
fn test_error_as_message_reaches_every_sink() {
    let (logger, console) = test_logger();

    logger.error(ErrorInfo::msg("boom"), ());

    assert!(console.contents().contains("boom"));
    let last = last_log_line(&logger);
    assert!(last.contains("error:boom"));
    assert!(last.contains("boom"));
    assert!(last.contains("\"stack\""));
}

#[test]
fn test_error_field_precedence() {
    let (logger, _) = test_logger();

    logger.info(
        "with error",
        Fields::new().with("error", ErrorInfo::msg("inner")).with("foo", 1),
    );

    let last = last_log_line(&logger);
    let json_start = last.find('{').unwrap();
    let details: serde_json::Value = serde_json::from_str(&last[json_start..]).unwrap();
    assert_eq!(details["foo"], 1);
    assert_eq!(details["error"]["error"]["name"], "Error");
    assert_eq!(details["error"]["error"]["message"], "inner");
    assert_eq!(details.as_object().unwrap().len(), 2);
}

#[test]
fn test_clear_then_one_call() {
    let (logger, _) = test_logger();
    for i in 0..5 {
        logger.debug(format!("line {}", i), ());
    }

    logger.clear_log_memory();
    logger.info("after clear", ());

    let memory = logger.get_log_memory();
    assert_eq!(memory.len(), 1);
    assert!(memory[0].ends_with("info:after clear"));
}

#[test]
fn test_snapshot_isolation() {
    let (logger, _) = test_logger();
    logger.info("first", ());

    let mut snapshot = logger.get_log_memory();
    snapshot.push("local only".to_string());
    logger.info("second", ());

    let memory = logger.get_log_memory();
    assert_eq!(memory.len(), 2);
    assert!(!memory.iter().any(|line| line == "local only"));
}

#[test]
fn test_circular_context_does_not_escape() {
    let (logger, console) = test_logger();
    let node = SharedValue::object();
    node.insert("name", "node");
    node.insert("self", node.clone());

    logger.warn("cycle", Fields::new().with("node", node));

    assert!(console.contents().contains(r#"DD={"node":{"name":"node"}}"#));
}

#[test]
fn test_pretty_console_option() {
    let (logger, console) = test_logger();

    logger.log(
        LogLevel::Info,
        "pretty",
        Fields::new().with("a", 1),
        LogOptions::pretty(),
    );

    assert!(console.contents().contains("DD={\n  \"a\": 1\n}"));
}

#[test]
fn test_levels_are_not_filtered() {
    let (logger, console) = test_logger();

    logger.debug("d", ());
    logger.info("i", ());
    logger.warn("w", ());
    logger.error("e", ());

    let lines = console.lines();
    assert_eq!(lines.len(), 4);
    for (line, level) in lines.iter().zip(["debug", "info", "warn", "error"]) {
        assert!(line.contains(&format!("[{}]", level)), "{}", line);
    }
    assert_eq!(logger.get_log_memory().len(), 4);
}

#[test]
fn test_logger_is_shared_across_threads() {
    let (logger, _) = test_logger();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("thread {} line {}", t, i), ());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(logger.get_log_memory().len(), 100);
}
