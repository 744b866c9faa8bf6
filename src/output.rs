//! Output routing for report text.

use std::io::{self, Write};

/// Output writer that handles stdout/stderr routing
pub struct OutputWriter {
    use_stderr: bool,
    quiet: bool,
}

impl OutputWriter {
    pub fn new(use_stderr: bool, quiet: bool) -> Self {
        Self { use_stderr, quiet }
    }

    /// Write a line to the report stream
    pub fn writeln(&self, content: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_stderr {
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "{content}")
        } else {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}")?;
            stdout.flush()
        }
    }

    /// Write error output (always to stderr, even when quiet)
    pub fn write_error(&self, content: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{content}")
    }
}
