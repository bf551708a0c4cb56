//! File sink with size- and date-based rotation
//!
//! Owns the log file handle, a running byte counter, and the current-date
//! marker. A file is named `<prefix>_<date>_<time>.log` and is replaced
//! whenever the next write would push it past the size limit or the local
//! calendar date has changed. Flushing is deferred until a byte threshold
//! accumulates, an Error/Fatal record arrives, or a rotation closes the
//! file, which bounds both syscall overhead and the durability gap.

use crate::core::{timestamp, EngineError, Result, Severity};
use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Unflushed bytes that force a flush on the next write.
pub const FLUSH_THRESHOLD: u64 = 4096;

pub struct FileSink {
    prefix: String,
    max_size: u64,
    current_size: u64,
    unflushed: u64,
    current_date: NaiveDate,
    current_path: PathBuf,
    writer: Option<BufWriter<File>>,
    rotations: u64,
    flushes: u64,
}

impl FileSink {
    /// Open a file sink for `prefix`, never failing the caller.
    ///
    /// If the dated file cannot be opened the failure is reported on stderr
    /// and the sink starts inert; a later rotation attempt (a date change)
    /// retries the open.
    pub fn open(prefix: String, max_size: u64) -> Self {
        let now = timestamp::now();
        let (writer, current_path) = match Self::open_writer(&prefix, &now) {
            Ok((writer, path)) => (Some(writer), path),
            Err(e) => {
                eprintln!("[FANLOG ERROR] {}", e);
                (None, PathBuf::new())
            }
        };

        Self {
            prefix,
            max_size,
            current_size: 0,
            unflushed: 0,
            current_date: now.date_naive(),
            current_path,
            writer,
            rotations: 0,
            flushes: 0,
        }
    }

    /// Re-registration: close the current handle, reset counters, reopen.
    ///
    /// The prefix stays fixed for the sink's lifetime (first registration
    /// wins); the size limit may be updated.
    pub fn reopen(&mut self, max_size: u64) {
        if let Err(e) = self.close() {
            eprintln!("[FANLOG ERROR] {}", e);
        }
        self.max_size = max_size;
        self.current_size = 0;
        self.unflushed = 0;

        let now = timestamp::now();
        self.current_date = now.date_naive();
        match Self::open_writer(&self.prefix, &now) {
            Ok((writer, path)) => {
                self.writer = Some(writer);
                self.current_path = path;
            }
            Err(e) => {
                eprintln!("[FANLOG ERROR] {}", e);
                self.writer = None;
            }
        }
    }

    fn open_writer(
        prefix: &str,
        now: &chrono::DateTime<chrono::Local>,
    ) -> Result<(BufWriter<File>, PathBuf)> {
        let path = PathBuf::from(format!(
            "{}_{}.log",
            prefix,
            timestamp::format_file_stamp(now)
        ));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| EngineError::file_open(path.display().to_string(), e.to_string()))?;
        Ok((BufWriter::new(file), path))
    }

    /// True when appending `next_len` more bytes would exceed the size
    /// limit, or the local calendar date has moved past the stored marker.
    pub fn should_rotate(&self, next_len: u64) -> bool {
        if self.current_size + next_len > self.max_size {
            return true;
        }
        timestamp::current_date() != self.current_date
    }

    /// Flush and close the current file, then open a fresh dated one.
    ///
    /// Counters reset even when the reopen fails, leaving the sink inert
    /// until the next date boundary retries it.
    fn rotate(&mut self) -> Result<()> {
        self.close()?;

        self.current_size = 0;
        self.unflushed = 0;
        self.rotations += 1;

        let now = timestamp::now();
        self.current_date = now.date_naive();
        let (writer, path) = Self::open_writer(&self.prefix, &now)
            .map_err(|e| EngineError::rotation(self.prefix.clone(), e.to_string()))?;
        self.writer = Some(writer);
        self.current_path = path;
        Ok(())
    }

    /// Append one composed line, rotating first if this write would cross
    /// the size limit or the date boundary.
    pub fn append(&mut self, level: Severity, line: &str) -> Result<()> {
        let len = line.len() as u64;

        if self.should_rotate(len) {
            self.rotate()?;
        }

        let Some(writer) = self.writer.as_mut() else {
            // Inert after a failed open; nothing to write to.
            return Ok(());
        };

        writer.write_all(line.as_bytes())?;
        self.current_size += len;
        self.unflushed += len;

        if self.unflushed >= FLUSH_THRESHOLD || level.is_critical() {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
            self.flushes += 1;
            self.unflushed = 0;
        }
        Ok(())
    }

    /// Flush and release the file handle.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            self.flushes += 1;
            self.unflushed = 0;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.current_path
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn unflushed_bytes(&self) -> u64 {
        self.unflushed
    }

    #[must_use]
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    #[must_use]
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    #[cfg(test)]
    fn set_date_marker(&mut self, date: NaiveDate) {
        self.current_date = date;
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Best effort flush; the handle is released either way.
        let _ = self.close();
    }
}
