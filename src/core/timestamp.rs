//! Timestamp formatting utilities
//!
//! Wall-clock timestamps for composed log lines, dated stamps for log file
//! names, and the calendar-date marker driving date-based rotation.

use chrono::{DateTime, Local, NaiveDate};

/// Line timestamp format: `2025-01-08 10:30:45.123`
const LINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// File-name stamp format: `2025-01-08_10-30-45`
const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Wall-clock time, taken at format time rather than enqueue time.
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Format a timestamp for a composed log line.
#[must_use]
pub fn format_line_timestamp(datetime: &DateTime<Local>) -> String {
    datetime.format(LINE_FORMAT).to_string()
}

/// Format a timestamp for embedding in a log file name.
///
/// Uses `-` in the time component, keeping file names free of `:`.
#[must_use]
pub fn format_file_stamp(datetime: &DateTime<Local>) -> String {
    datetime.format(FILE_STAMP_FORMAT).to_string()
}

/// The local calendar date, used as the file sink's rotation marker.
#[must_use]
pub fn current_date() -> NaiveDate {
    Local::now().date_naive()
}
