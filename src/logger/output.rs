//! Destinations a [`LevelLogger`](super::LevelLogger) writes to.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Output capability supplied by the embedding application.
///
/// Exposes a formatted entry point and a raw byte-stream handle. The logger
/// only ever borrows the writer for the duration of one segment.
pub trait CustomLogger: Send + Sync {
    /// Raw writer handle.
    fn writer(&self) -> Box<dyn Write + '_>;

    /// Format `args` and write them out. Errors are dropped.
    fn printf(&self, args: fmt::Arguments<'_>) {
        let _ = self.writer().write_fmt(args);
    }
}

/// Process standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl CustomLogger for Stdout {
    fn writer(&self) -> Box<dyn Write + '_> {
        Box::new(io::stdout().lock())
    }
}

/// Process standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stderr;

impl CustomLogger for Stderr {
    fn writer(&self) -> Box<dyn Write + '_> {
        Box::new(io::stderr().lock())
    }
}

/// In-memory sink, handy for capturing log output.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    buf: Mutex<Vec<u8>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct MemoryWriter<'a>(MutexGuard<'a, Vec<u8>>);

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CustomLogger for MemoryOutput {
    fn writer(&self) -> Box<dyn Write + '_> {
        Box::new(MemoryWriter(self.lock()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_output_collects_writes() {
        let output = MemoryOutput::new();
        assert!(output.is_empty());

        output.writer().write_all(b"hello ").unwrap();
        output.printf(format_args!("{}-{}", "world", 42));

        assert_eq!(output.contents(), "hello world-42");
    }

    #[test]
    fn test_memory_output_clear() {
        let output = MemoryOutput::new();
        output.printf(format_args!("something"));
        output.clear();
        assert!(output.is_empty());
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn test_writer_guard_released_between_calls() {
        let output = MemoryOutput::new();
        for i in 0..3 {
            let mut w = output.writer();
            write!(w, "{i}").unwrap();
        }
        assert_eq!(output.contents(), "012");
    }
}
