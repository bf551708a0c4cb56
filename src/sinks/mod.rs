//! Sink implementations and fan-out

pub mod console;
pub mod file;
pub mod network;
pub mod null;

pub use console::ConsoleSink;
pub use file::{FileSink, FLUSH_THRESHOLD};
pub use network::{LinkState, NetworkSink, RECONNECT_BACKOFF};
pub use null::NullSink;

use crate::core::{timestamp, Record};
use parking_lot::{Mutex, RwLock};

/// The four built-in sink kinds.
///
/// Fan-out visits registered kinds in declaration order, independent of
/// registration order, so output order is deterministic for a given
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SinkKind {
    Console,
    File,
    Null,
    Network,
}

impl SinkKind {
    pub fn name(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::File => "file",
            SinkKind::Null => "null",
            SinkKind::Network => "network",
        }
    }
}

/// Compose the single output line for a record.
///
/// The timestamp is taken here, at format time, not at enqueue time.
pub(crate) fn compose_line(record: &Record) -> String {
    format!(
        "[{}] [{}] {}\n",
        timestamp::format_line_timestamp(&timestamp::now()),
        record.level,
        record.message
    )
}

/// The set of active sinks and their state.
///
/// The file sink sits behind its own mutex, distinct from the ingestion
/// queue, so file writes never block producers enqueuing records.
pub(crate) struct SinkSet {
    kinds: RwLock<Vec<SinkKind>>,
    console: ConsoleSink,
    null: NullSink,
    file: Mutex<Option<FileSink>>,
    network: RwLock<Option<NetworkSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self {
            kinds: RwLock::new(Vec::new()),
            console: ConsoleSink::new(),
            null: NullSink::new(),
            file: Mutex::new(None),
            network: RwLock::new(None),
        }
    }

    /// Add a kind to the fan-out. Idempotent; returns true when the kind
    /// was newly registered.
    pub fn register(&self, kind: SinkKind) -> bool {
        let mut kinds = self.kinds.write();
        if kinds.contains(&kind) {
            return false;
        }
        kinds.push(kind);
        kinds.sort_unstable();
        true
    }

    pub fn is_registered(&self, kind: SinkKind) -> bool {
        self.kinds.read().contains(&kind)
    }

    pub fn file(&self) -> &Mutex<Option<FileSink>> {
        &self.file
    }

    pub fn network(&self) -> &RwLock<Option<NetworkSink>> {
        &self.network
    }

    /// Render `record` once and route the line to every registered kind.
    ///
    /// A failing sink is reported on stderr and never disturbs the others.
    pub fn dispatch(&self, record: &Record) {
        let line = compose_line(record);
        let kinds: Vec<SinkKind> = self.kinds.read().clone();

        for kind in kinds {
            let result = match kind {
                SinkKind::Console => self.console.write(record.level, &line),
                SinkKind::File => match self.file.lock().as_mut() {
                    Some(sink) => sink.append(record.level, &line),
                    None => Ok(()),
                },
                SinkKind::Null => self.null.write(record.level, &line),
                SinkKind::Network => {
                    if let Some(sink) = self.network.read().as_ref() {
                        sink.post(line.clone());
                    }
                    Ok(())
                }
            };

            if let Err(e) = result {
                eprintln!("[FANLOG ERROR] {} sink failed: {}", kind.name(), e);
            }
        }
    }

    /// Flush buffered sinks.
    pub fn flush(&self) {
        if let Err(e) = self.console.flush() {
            eprintln!("[FANLOG ERROR] console sink flush failed: {}", e);
        }
        if let Some(sink) = self.file.lock().as_mut() {
            if let Err(e) = sink.flush() {
                eprintln!("[FANLOG ERROR] file sink flush failed: {}", e);
            }
        }
    }
}
