//! Main logger implementation

use super::dispatcher::Dispatcher;
use super::metrics::EngineMetrics;
use super::record::Record;
use super::severity::Severity;
use crate::sinks::{FileSink, NetworkSink, SinkKind, SinkSet};
use crossbeam_channel::{unbounded, Sender};
use std::sync::Arc;
use std::thread;

pub struct Logger {
    debug_enabled: bool,
    sender: Option<Sender<Record>>,
    dispatcher: Option<thread::JoinHandle<()>>,
    sinks: Arc<SinkSet>,
    metrics: Arc<EngineMetrics>,
}

impl Logger {
    /// Create a logger and start its dispatcher thread.
    ///
    /// `debug_enabled` controls whether Debug records enter the queue at
    /// all; `batch_size` is how many records the dispatcher withdraws per
    /// queue wakeup (values below 1 are treated as 1).
    #[must_use]
    pub fn new(debug_enabled: bool, batch_size: usize) -> Self {
        let (sender, receiver) = unbounded();
        let sinks = Arc::new(SinkSet::new());
        let metrics = Arc::new(EngineMetrics::new());
        let dispatcher =
            Dispatcher::spawn(receiver, Arc::clone(&sinks), Arc::clone(&metrics), batch_size);

        Self {
            debug_enabled,
            sender: Some(sender),
            dispatcher: Some(dispatcher),
            sinks,
            metrics,
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Add the console to the fan-out. Idempotent.
    pub fn add_console_sink(&self) {
        self.sinks.register(SinkKind::Console);
    }

    /// Add the discard sink to the fan-out. Idempotent.
    pub fn add_null_sink(&self) {
        self.sinks.register(SinkKind::Null);
    }

    /// Add a rotating file sink. Idempotent; the first call fixes the path
    /// prefix for the logger's lifetime, later calls reopen with the
    /// original prefix and may update the size limit.
    ///
    /// An unopenable file is reported on stderr and leaves the sink inert
    /// rather than failing the caller.
    pub fn add_file_sink(&self, prefix: impl Into<String>, max_size_bytes: u64) {
        self.sinks.register(SinkKind::File);
        let mut slot = self.sinks.file().lock();
        match slot.as_mut() {
            Some(sink) => sink.reopen(max_size_bytes),
            None => *slot = Some(FileSink::open(prefix.into(), max_size_bytes)),
        }
    }

    /// Add a TCP sink targeting `host:port`. Idempotent; the first call
    /// fixes the target and starts the reactor thread.
    pub fn add_network_sink(&self, host: impl Into<String>, port: u16) {
        if !self.sinks.register(SinkKind::Network) {
            return;
        }
        *self.sinks.network().write() = Some(NetworkSink::connect(host.into(), port));
    }

    /// Submit a record. Fire and forget: never blocks on I/O, never fails.
    ///
    /// Debug records are dropped before entering the queue unless the
    /// logger was constructed with `debug_enabled`. A call after shutdown
    /// is silently ignored.
    pub fn log(&self, level: Severity, message: impl Into<String>) {
        if level == Severity::Debug && !self.debug_enabled {
            self.metrics.record_debug_suppressed();
            return;
        }

        if let Some(sender) = self.sender.as_ref() {
            if sender.send(Record::new(level, message.into())).is_ok() {
                self.metrics.record_enqueued();
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Severity::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Severity::Fatal, message);
    }

    #[must_use]
    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Flush buffered sinks without stopping the engine.
    pub fn flush(&self) {
        self.sinks.flush();
    }

    /// Stop the engine, draining everything already queued. Idempotent;
    /// also invoked by `Drop`.
    ///
    /// Order matters: the dispatcher is stopped and joined before the
    /// network reactor is torn down, so the final drain cannot post work
    /// into a stopped reactor. Lines still queued inside the network sink
    /// at this point are discarded, not delivered.
    pub fn shutdown(&mut self) {
        // Closing the channel is the stop signal; it also wakes a blocked
        // dispatcher.
        drop(self.sender.take());

        if let Some(handle) = self.dispatcher.take() {
            if handle.join().is_err() {
                eprintln!("[FANLOG ERROR] Dispatcher thread panicked during shutdown");
            }
        }

        if let Some(mut network) = self.sinks.network().write().take() {
            network.shutdown();
        }

        if let Some(file) = self.sinks.file().lock().as_mut() {
            if let Err(e) = file.close() {
                eprintln!("[FANLOG ERROR] {}", e);
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false, 1)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use fanlog::Logger;
///
/// let logger = Logger::builder()
///     .debug(true)
///     .batch_size(16)
///     .build();
/// logger.add_null_sink();
/// logger.info("engine up");
/// ```
pub struct LoggerBuilder {
    debug_enabled: bool,
    batch_size: usize,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            debug_enabled: false,
            batch_size: 1,
        }
    }

    /// Allow Debug records through to the sinks.
    #[must_use = "builder methods return a new value"]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Records the dispatcher withdraws per queue wakeup.
    #[must_use = "builder methods return a new value"]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn build(self) -> Logger {
        Logger::new(self.debug_enabled, self.batch_size)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
