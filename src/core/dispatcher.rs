//! Dispatcher worker
//!
//! A single background thread drains the ingestion queue and hands each
//! record to the sink fan-out. The loop is an explicit state machine:
//! Running while the channel is open, Draining once the stop signal (a
//! closed channel) is observed, Stopped after a final drain pass has
//! dispatched anything that raced shutdown.

use super::metrics::EngineMetrics;
use super::record::Record;
use crate::sinks::SinkSet;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatcherState {
    Running,
    Draining,
    Stopped,
}

pub(crate) struct Dispatcher {
    receiver: Receiver<Record>,
    sinks: Arc<SinkSet>,
    metrics: Arc<EngineMetrics>,
    batch_size: usize,
}

impl Dispatcher {
    pub fn spawn(
        receiver: Receiver<Record>,
        sinks: Arc<SinkSet>,
        metrics: Arc<EngineMetrics>,
        batch_size: usize,
    ) -> thread::JoinHandle<()> {
        let dispatcher = Self {
            receiver,
            sinks,
            metrics,
            batch_size: batch_size.max(1),
        };
        thread::spawn(move || dispatcher.run())
    }

    fn run(self) {
        let mut batch = Vec::with_capacity(self.batch_size);
        let mut state = DispatcherState::Running;

        while state == DispatcherState::Running {
            state = self.collect_batch(&mut batch);
            self.dispatch_batch(&mut batch);
        }

        while state == DispatcherState::Draining {
            state = match self.receiver.try_recv() {
                Ok(record) => {
                    self.dispatch_one(record);
                    DispatcherState::Draining
                }
                Err(_) => DispatcherState::Stopped,
            };
        }
    }

    /// Block for one record, then take up to `batch_size - 1` more without
    /// blocking. Withdrawn records keep FIFO order; batching only amortizes
    /// queue wakeups, it never delays delivery past one wake cycle.
    fn collect_batch(&self, batch: &mut Vec<Record>) -> DispatcherState {
        match self.receiver.recv() {
            Ok(record) => {
                batch.push(record);
                while batch.len() < self.batch_size {
                    match self.receiver.try_recv() {
                        Ok(record) => batch.push(record),
                        Err(_) => break,
                    }
                }
                DispatcherState::Running
            }
            // Channel closed and empty: stop was requested.
            Err(_) => DispatcherState::Draining,
        }
    }

    fn dispatch_batch(&self, batch: &mut Vec<Record>) {
        for record in batch.drain(..) {
            self.dispatch_one(record);
        }
    }

    fn dispatch_one(&self, record: Record) {
        if record.message.is_empty() {
            self.metrics.record_empty_skipped();
            return;
        }
        self.sinks.dispatch(&record);
        self.metrics.record_dispatched();
    }
}
