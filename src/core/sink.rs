//! Backend sink
//!
//! The sink owns the output appenders and the level threshold. It decides
//! whether a record is written, attaches caller and stacktrace, and applies the
//! terminal behaviour of the Panic, DPanic and Fatal levels.

use super::{
    appender::Appender,
    error::Result,
    field::Field,
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
};
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::panic::Location;

/// What happens after a Fatal record has been written and flushed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FatalHook {
    /// Exit the process with status 1
    #[default]
    Exit,
    /// Unwind with the record's message; for tests only
    Panic,
}

impl FatalHook {
    pub fn terminate(&self, message: &str) -> ! {
        match self {
            FatalHook::Exit => std::process::exit(1),
            FatalHook::Panic => panic!("fatal: {}", message),
        }
    }
}

pub struct Sink {
    min_level: LogLevel,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
    development: bool,
    disable_caller: bool,
    disable_stacktrace: bool,
    fatal_hook: FatalHook,
}

impl Sink {
    #[must_use]
    pub fn builder() -> SinkBuilder {
        SinkBuilder::new()
    }

    /// A sink with no outputs that accepts nothing below Fatal
    #[must_use]
    pub fn nop() -> Self {
        Self::builder().min_level(LogLevel::Fatal).build()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    pub fn fatal_hook(&self) -> FatalHook {
        self.fatal_hook
    }

    /// Emit a record attributed to `caller`
    ///
    /// Panic always panics afterwards, DPanic panics in development mode and
    /// Fatal terminates through the configured [`FatalHook`], whether or not
    /// the level is enabled.
    pub fn emit(
        &self,
        level: LogLevel,
        message: String,
        fields: Vec<Field>,
        caller: &'static Location<'static>,
    ) {
        match level {
            LogLevel::Fatal => self.fatal(message, fields, caller),
            LogLevel::Panic => {
                let message = self.write(level, message, fields, caller);
                self.flush_quietly();
                panic!("{}", message);
            }
            LogLevel::DPanic if self.development => {
                let message = self.write(level, message, fields, caller);
                self.flush_quietly();
                panic!("{}", message);
            }
            _ => {
                self.write(level, message, fields, caller);
            }
        }
    }

    /// Write a Fatal record, flush, then terminate
    pub fn fatal(
        &self,
        message: String,
        fields: Vec<Field>,
        caller: &'static Location<'static>,
    ) -> ! {
        let message = self.write(LogLevel::Fatal, message, fields, caller);
        self.flush_quietly();
        self.fatal_hook.terminate(&message)
    }

    /// Flush every appender, returning the first failure
    pub fn sync(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        let mut first_error = None;
        for appender in appenders.iter_mut() {
            if let Err(e) = appender.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush_quietly(&self) {
        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Failed to flush before termination: {}", e);
        }
    }

    /// Returns the message so terminal levels can reuse it
    fn write(
        &self,
        level: LogLevel,
        message: String,
        fields: Vec<Field>,
        caller: &'static Location<'static>,
    ) -> String {
        if !self.enabled(level) {
            return message;
        }

        let mut entry = LogEntry::new(level, message).with_fields(fields);
        if !self.disable_caller {
            entry = entry.with_caller(Caller::from_location(caller));
        }
        if self.wants_stacktrace(level) {
            entry = entry.with_stacktrace(Backtrace::force_capture().to_string());
        }

        let mut appenders = self.appenders.lock();
        Self::process_sync(&mut appenders, &entry);
        entry.message
    }

    fn wants_stacktrace(&self, level: LogLevel) -> bool {
        if self.disable_stacktrace {
            return false;
        }
        let threshold = if self.development {
            LogLevel::Warn
        } else {
            LogLevel::Error
        };
        level >= threshold
    }

    /// Deliver one entry to every appender with per-appender panic isolation
    ///
    /// A failing or panicking appender is reported on stderr and never stops
    /// the others from receiving the entry.
    fn process_sync(appenders: &mut [Box<dyn Appender>], entry: &LogEntry) {
        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                }
            }
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .appenders
            .lock()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        f.debug_struct("Sink")
            .field("min_level", &self.min_level)
            .field("appenders", &names)
            .field("development", &self.development)
            .field("fatal_hook", &self.fatal_hook)
            .finish()
    }
}

/// Builder for constructing a [`Sink`] with a fluent API
///
/// # Example
/// ```
/// use fieldlog::prelude::*;
///
/// let (observer, logs) = ObserverAppender::new();
/// let sink = Sink::builder()
///     .min_level(LogLevel::Warn)
///     .appender(observer)
///     .fatal_hook(FatalHook::Panic)
///     .build();
/// assert!(!sink.enabled(LogLevel::Info));
/// assert!(logs.is_empty());
/// ```
pub struct SinkBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    development: bool,
    disable_caller: bool,
    disable_stacktrace: bool,
    fatal_hook: FatalHook,
}

impl SinkBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            development: false,
            disable_caller: false,
            disable_stacktrace: false,
            fatal_hook: FatalHook::Exit,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_caller(mut self, disable: bool) -> Self {
        self.disable_caller = disable;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_stacktrace(mut self, disable: bool) -> Self {
        self.disable_stacktrace = disable;
        self
    }

    /// Termination strategy for Fatal records
    #[must_use = "builder methods return a new value"]
    pub fn fatal_hook(mut self, hook: FatalHook) -> Self {
        self.fatal_hook = hook;
        self
    }

    pub fn build(self) -> Sink {
        Sink {
            min_level: self.min_level,
            appenders: Mutex::new(self.appenders),
            development: self.development,
            disable_caller: self.disable_caller,
            disable_stacktrace: self.disable_stacktrace,
            fatal_hook: self.fatal_hook,
        }
    }
}

impl Default for SinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
