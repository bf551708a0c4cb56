//! Console sink implementation

use crate::core::{Result, Severity};
use colored::Colorize;

/// Writes composed lines to the terminal.
///
/// Error and Fatal lines go to stderr, everything else to stdout. No state
/// beyond the color switch; lines arrive already composed and terminated.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn write(&self, level: Severity, line: &str) -> Result<()> {
        let rendered = if self.use_colors {
            line.color(level.color()).to_string()
        } else {
            line.to_string()
        };

        if level.is_critical() {
            eprint!("{}", rendered);
        } else {
            print!("{}", rendered);
        }
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_does_not_fail() {
        let sink = ConsoleSink::with_colors(false);
        sink.write(Severity::Info, "[ts] [INFO] hello\n").unwrap();
        sink.write(Severity::Fatal, "[ts] [FATAL] boom\n").unwrap();
        sink.flush().unwrap();
    }
}
