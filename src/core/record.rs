//! Log record structure

use super::severity::Severity;

/// A single pending log message.
///
/// Immutable once enqueued; consumed exactly once by the dispatcher. The
/// line timestamp is taken when the record is formatted, not when it is
/// created, so a record carries only its severity and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Severity,
    pub message: String,
}

impl Record {
    /// Sanitize message text to prevent log injection.
    ///
    /// Newlines, carriage returns, and tabs are replaced with escape
    /// sequences so a record always composes to exactly one output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Severity, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = Record::new(Severity::Info, "hello".to_string());
        assert_eq!(record.level, Severity::Info);
        assert_eq!(record.message, "hello");
    }

    #[test]
    fn test_sanitize_newlines() {
        let record = Record::new(
            Severity::Info,
            "line one\nFAKE [ERROR] injected\nline two".to_string(),
        );
        assert!(!record.message.contains('\n'));
        assert!(record.message.contains("\\n"));
    }

    #[test]
    fn test_sanitize_tabs_and_returns() {
        let record = Record::new(Severity::Warning, "a\tb\rc".to_string());
        assert_eq!(record.message, "a\\tb\\rc");
    }
}
