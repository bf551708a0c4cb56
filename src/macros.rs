//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use fanlog::Logger;
//! use fanlog::info;
//!
//! let logger = Logger::new(false, 1);
//! logger.add_null_sink();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use fanlog::{Logger, Severity};
/// # let logger = Logger::new(false, 1);
/// use fanlog::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// Suppressed entirely unless the logger was constructed in debug mode.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Logger, Severity};

    #[test]
    fn test_log_macro() {
        let logger = Logger::new(false, 1);
        logger.add_null_sink();
        log!(logger, Severity::Info, "Test message");
        log!(logger, Severity::Info, "Formatted: {}", 42);
    }

    #[test]
    fn test_debug_macro() {
        let logger = Logger::new(true, 1);
        logger.add_null_sink();
        debug!(logger, "Debug message");
        debug!(logger, "Count: {}", 5);
    }

    #[test]
    fn test_info_macro() {
        let logger = Logger::new(false, 1);
        logger.add_null_sink();
        info!(logger, "Info message");
        info!(logger, "Items: {}", 100);
    }

    #[test]
    fn test_warning_macro() {
        let logger = Logger::new(false, 1);
        logger.add_null_sink();
        warning!(logger, "Warning message");
        warning!(logger, "Retry {} of {}", 1, 3);
    }

    #[test]
    fn test_error_macro() {
        let logger = Logger::new(false, 1);
        logger.add_null_sink();
        error!(logger, "Error message");
        error!(logger, "Code: {}", 500);
    }

    #[test]
    fn test_fatal_macro() {
        let logger = Logger::new(false, 1);
        logger.add_null_sink();
        fatal!(logger, "Fatal message");
        fatal!(logger, "Critical failure: {}", "system");
    }
}
