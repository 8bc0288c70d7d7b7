//! In-memory capture of emitted records for test assertions

use crate::core::{Appender, FatalHook, LogEntry, LogLevel, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Handle to the records captured by an [`ObserverAppender`]
///
/// Cloning the handle shares the same record buffer.
#[derive(Debug, Clone, Default)]
pub struct ObservedLogs {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl ObservedLogs {
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy of every captured record, oldest first
    pub fn all(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Drain the captured records, oldest first
    pub fn take_all(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn filter_message(&self, message: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }

    pub fn filter_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        self.entries.lock().push(entry);
    }
}

/// Appender that keeps every record in memory
pub struct ObserverAppender {
    logs: ObservedLogs,
}

impl ObserverAppender {
    pub fn new() -> (Self, ObservedLogs) {
        let logs = ObservedLogs::default();
        (Self { logs: logs.clone() }, logs)
    }
}

impl Appender for ObserverAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.logs.push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "observer"
    }
}

/// A sink capturing records at `level` and above
///
/// Fatal records unwind instead of exiting so tests can observe them.
pub fn observe(level: LogLevel) -> (Sink, ObservedLogs) {
    let (appender, logs) = ObserverAppender::new();
    let sink = Sink::builder()
        .min_level(level)
        .appender(appender)
        .fatal_hook(FatalHook::Panic)
        .build();
    (sink, logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::Location;

    #[test]
    fn test_observed_logs_drain() {
        let (sink, logs) = observe(LogLevel::Info);
        sink.emit(LogLevel::Info, "one".into(), vec![], Location::caller());
        sink.emit(LogLevel::Warn, "two".into(), vec![], Location::caller());
        sink.emit(LogLevel::Debug, "hidden".into(), vec![], Location::caller());

        assert_eq!(logs.len(), 2);
        assert_eq!(logs.filter_message("two").len(), 1);
        assert_eq!(logs.filter_level(LogLevel::Info).len(), 1);

        let snapshot = logs.all();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].level, LogLevel::Warn);
        assert_eq!(logs.len(), 2, "all() leaves the records in place");

        let drained = logs.take_all();
        assert_eq!(drained[0].message, "one");
        assert_eq!(drained[1].message, "two");
        assert!(logs.is_empty());
    }

    #[test]
    fn test_observe_uses_panic_hook() {
        let (sink, _logs) = observe(LogLevel::Debug);
        assert_eq!(sink.fatal_hook(), FatalHook::Panic);
    }
}
