//! Integration tests for the logging engine
//!
//! These tests verify:
//! - FIFO preservation through the file sink
//! - Debug suppression
//! - Shutdown drain guarantees
//! - Idempotent sink registration
//! - Thread safety under concurrent producers

use fanlog::Logger;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Collect the contents of every log file under `dir` with `prefix`,
/// concatenated in file-name order (dated names sort chronologically).
fn read_log_files(dir: &Path, prefix: &str) -> String {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .expect("Failed to read log dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix) && n.ends_with(".log"))
        })
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|p| fs::read_to_string(p).expect("Failed to read log file"))
        .collect()
}

fn log_file_count(dir: &Path, prefix: &str) -> usize {
    fs::read_dir(dir)
        .expect("Failed to read log dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| n.starts_with(prefix) && n.ends_with(".log"))
        })
        .count()
}

#[test]
fn test_fifo_preservation_single_producer() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("fifo").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&prefix, 10 * 1024 * 1024);

    for i in 0..100 {
        logger.info(format!("message {:03}", i));
    }
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "fifo");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 100);

    for (i, line) in lines.iter().enumerate() {
        assert!(
            line.ends_with(&format!("message {:03}", i)),
            "Line {} out of order: {}",
            i,
            line
        );
    }
}

#[test]
fn test_line_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("format").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&prefix, 1024 * 1024);
    logger.warning("something odd");
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "format");
    let line = content.lines().next().expect("one line written");

    // [2025-01-08 10:30:45.123] [WARNING] something odd
    assert!(line.starts_with('['));
    assert!(line.contains("] [WARNING] "));
    assert!(line.ends_with("something odd"));
}

#[test]
fn test_debug_suppression() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("nodebug").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&prefix, 1024 * 1024);

    logger.debug("hidden");
    logger.info("shown");
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "nodebug");
    assert!(!content.contains("hidden"));
    assert!(content.contains("shown"));
    assert_eq!(logger.metrics().debug_suppressed(), 1);
}

#[test]
fn test_debug_enabled_passes_through() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("withdebug").display().to_string();

    let mut logger = Logger::new(true, 1);
    logger.add_file_sink(&prefix, 1024 * 1024);

    logger.debug("diagnostic detail");
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "withdebug");
    assert!(content.contains("[DEBUG] diagnostic detail"));
}

#[test]
fn test_shutdown_drains_all_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("drain").display().to_string();

    let mut logger = Logger::new(false, 4);
    logger.add_file_sink(&prefix, 10 * 1024 * 1024);

    for i in 0..500 {
        logger.info(format!("queued {}", i));
    }
    // No sleep: shutdown itself must deliver everything already enqueued.
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "drain");
    assert_eq!(content.lines().count(), 500);
    assert_eq!(logger.metrics().dispatched(), 500);
}

#[test]
fn test_shutdown_twice_is_safe() {
    let mut logger = Logger::new(false, 1);
    logger.add_null_sink();
    logger.info("once");

    logger.shutdown();
    logger.shutdown();
}

#[test]
fn test_drop_without_explicit_shutdown_drains() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("dropped").display().to_string();

    {
        let logger = Logger::new(false, 1);
        logger.add_file_sink(&prefix, 1024 * 1024);
        for i in 0..10 {
            logger.info(format!("message {}", i));
        }
        // Logger drops here.
    }

    let content = read_log_files(temp_dir.path(), "dropped");
    assert_eq!(content.lines().count(), 10);
}

#[test]
fn test_file_sink_first_prefix_wins() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("keeper").display().to_string();
    let second = temp_dir.path().join("ignored").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&first, 1024 * 1024);
    logger.add_file_sink(&second, 1024 * 1024);

    logger.info("routed to the first prefix");
    logger.shutdown();

    assert!(log_file_count(temp_dir.path(), "keeper") >= 1);
    assert_eq!(log_file_count(temp_dir.path(), "ignored"), 0);

    let content = read_log_files(temp_dir.path(), "keeper");
    assert!(content.contains("routed to the first prefix"));
}

#[test]
fn test_rotation_by_size_through_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("rotating").display().to_string();

    // Lines are ~70 bytes composed; a 200-byte cap forces rotations.
    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&prefix, 200);

    for i in 0..20 {
        logger.info(format!("rotation filler message number {:02}", i));
    }
    logger.shutdown();

    // Every record survives rotation, in order.
    let content = read_log_files(temp_dir.path(), "rotating");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 20);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("number {:02}", i)));
    }
}

#[test]
fn test_rotation_produces_distinct_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("split").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&prefix, 80);

    logger.info("first file payload padding padding");
    // Rotation recomputes the file name from the clock; cross a second
    // boundary so the successor gets a distinct name.
    std::thread::sleep(std::time::Duration::from_millis(1100));
    logger.info("second file payload padding padding");
    logger.shutdown();

    assert!(log_file_count(temp_dir.path(), "split") >= 2);
}

#[test]
fn test_concurrent_producers_all_delivered_in_thread_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("concurrent").display().to_string();

    let logger = Logger::new(false, 8);
    logger.add_file_sink(&prefix, 10 * 1024 * 1024);
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger_clone = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..20 {
                logger_clone.info(format!("thread {} message {:02}", thread_id, i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Producer thread panicked");
    }

    let mut logger = Arc::try_unwrap(logger).unwrap_or_else(|_| panic!("logger still shared"));
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "concurrent");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 100);

    // Per-producer FIFO: each thread's messages appear in emission order.
    for thread_id in 0..5 {
        let needle = format!("thread {} message", thread_id);
        let indices: Vec<usize> = lines
            .iter()
            .filter(|l| l.contains(&needle))
            .map(|l| {
                l.rsplit(' ')
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .expect("message index")
            })
            .collect();
        assert_eq!(indices.len(), 20);
        assert!(
            indices.windows(2).all(|w| w[0] < w[1]),
            "Thread {} messages reordered: {:?}",
            thread_id,
            indices
        );
    }
}

#[test]
fn test_log_injection_is_escaped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("inject").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_file_sink(&prefix, 1024 * 1024);

    logger.info("User login\n[2026-01-01 00:00:00.000] [ERROR] forged entry");
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "inject");
    assert_eq!(content.lines().count(), 1, "Injected newline must not split the line");
    assert!(content.contains("\\n"));
}

#[test]
fn test_null_sink_only() {
    let mut logger = Logger::new(false, 1);
    logger.add_null_sink();

    for i in 0..100 {
        logger.info(format!("discarded {}", i));
    }
    logger.shutdown();

    assert_eq!(logger.metrics().dispatched(), 100);
}

#[test]
fn test_combined_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefix = temp_dir.path().join("combined").display().to_string();

    let mut logger = Logger::new(false, 1);
    logger.add_null_sink();
    logger.add_file_sink(&prefix, 1024 * 1024);

    logger.error("reaches every sink once");
    logger.shutdown();

    let content = read_log_files(temp_dir.path(), "combined");
    assert_eq!(content.lines().count(), 1);
    assert_eq!(logger.metrics().dispatched(), 1);
}
