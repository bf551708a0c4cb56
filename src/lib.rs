//! # Fanlog
//!
//! An embeddable, asynchronous, multi-sink logging engine.
//!
//! Callers submit records from any thread; a dedicated dispatcher thread
//! drains them, composes one line per record, and fans it out to the
//! configured destinations: console, a size- and date-rotated file, a
//! discard sink, and/or a TCP peer with automatic reconnection.
//!
//! ## Features
//!
//! - **Non-blocking emission**: `log()` never performs I/O
//! - **Multiple Sinks**: console, rotating file, null, and network
//! - **Thread Safe**: designed for concurrent producers
//! - **Graceful Shutdown**: queued records are drained before threads stop
//!
//! ## Example
//!
//! ```no_run
//! use fanlog::{Logger, Severity};
//!
//! let mut logger = Logger::new(false, 8);
//! logger.add_console_sink();
//! logger.add_file_sink("/var/log/myapp", 10 * 1024 * 1024);
//! logger.add_network_sink("logs.internal", 5514);
//!
//! logger.log(Severity::Info, "service started");
//! logger.shutdown();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        EngineError, EngineMetrics, Logger, LoggerBuilder, Record, Result, Severity,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, NetworkSink, NullSink, SinkKind};
}

pub use crate::core::{EngineError, EngineMetrics, Logger, LoggerBuilder, Record, Result, Severity};
pub use crate::sinks::{ConsoleSink, FileSink, NetworkSink, NullSink, SinkKind};
