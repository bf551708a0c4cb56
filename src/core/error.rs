//! Error types for the logging engine

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Log file could not be opened or created
    #[error("Failed to open log file '{path}': {message}")]
    FileOpen { path: String, message: String },

    /// File rotation failed
    #[error("Rotation failed for '{path}': {message}")]
    Rotation { path: String, message: String },

    /// Sink write failure
    #[error("Write failed on {sink} sink: {message}")]
    Write { sink: &'static str, message: String },
}

impl EngineError {
    pub fn file_open(path: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::FileOpen {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Rotation {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn write(sink: &'static str, message: impl Into<String>) -> Self {
        EngineError::Write {
            sink,
            message: message.into(),
        }
    }
}
