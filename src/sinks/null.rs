//! Null sink implementation
//!
//! Discards every line. Useful for benchmarking the engine's queue and
//! dispatch path without any output cost, and for tests that only care
//! about drain behavior.

use crate::core::{Result, Severity};

pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, _level: Severity, _line: &str) -> Result<()> {
        Ok(())
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}
