//! Console appender implementation

use crate::core::{Appender, Encoder, LogEntry, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes encoded records to the process's stdout or stderr
pub struct ConsoleAppender {
    stream: Stream,
    encoder: Encoder,
}

impl ConsoleAppender {
    pub fn new(stream: Stream, encoder: Encoder) -> Self {
        Self { stream, encoder }
    }

    pub fn stdout(encoder: Encoder) -> Self {
        Self::new(Stream::Stdout, encoder)
    }

    pub fn stderr(encoder: Encoder) -> Self {
        Self::new(Stream::Stderr, encoder)
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.encoder.encode(entry);
        match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(output.as_bytes())?,
            Stream::Stderr => std::io::stderr().lock().write_all(output.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
