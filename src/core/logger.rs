//! Logger facade
//!
//! A [`Logger`] pairs a shared [`Sink`] with an ordered list of common fields
//! that prefix every record it emits. Clones share the sink but each owns its
//! view of the common fields: appending on one never shows through another.
//!
//! ```
//! use fieldlog::prelude::*;
//! use fieldlog::fields;
//!
//! let (sink, logs) = observe(LogLevel::Debug);
//! let mut root = Logger::new(sink);
//! root.add_common([fields::string("service", "billing")]);
//!
//! let mut request = root.clone();
//! request.add_common([fields::method("POST")]);
//! request.info("charge accepted", &[fields::int("cents", 1299)]);
//! root.info("tick", &[]);
//!
//! let entries = logs.take_all();
//! let keys: Vec<&str> = entries[0].fields.iter().map(|f| f.key.as_str()).collect();
//! assert_eq!(keys, ["service", "method", "cents"]);
//! assert_eq!(entries[1].fields.len(), 1);
//! ```

use super::{
    config::LoggerConfig,
    error::Result,
    field::Field,
    log_level::LogLevel,
    options::ConfigOption,
    sink::Sink,
    timed::TimedLog,
};
use crate::environment::Environment;
use crate::fields;
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Logger {
    sink: Arc<Sink>,
    /// Copy-on-write: shared with clones until one of them appends
    common: Arc<Vec<Field>>,
    env: Environment,
    options: Vec<ConfigOption>,
}

impl Logger {
    /// Wrap an already-built sink
    #[must_use]
    pub fn new(sink: Sink) -> Self {
        Self {
            sink: Arc::new(sink),
            common: Arc::default(),
            env: Environment::default(),
            options: Vec::new(),
        }
    }

    /// A logger with no outputs that writes nothing at any level
    ///
    /// Fatal still terminates the process through [`FatalHook::Exit`](super::sink::FatalHook)
    /// and Panic still panics.
    #[must_use]
    pub fn nop() -> Self {
        Self::new(Sink::nop())
    }

    /// Apply `options` to `config` in order, then build the sink
    ///
    /// A configuration the backend rejects is reported on stderr and returned
    /// as [`LoggerError::InvalidConfiguration`](super::error::LoggerError).
    pub fn with_config(
        env: Environment,
        mut config: LoggerConfig,
        options: &[ConfigOption],
    ) -> Result<Self> {
        config.apply(options);

        let sink = config.build().map_err(|e| {
            eprintln!("[LOGGER ERROR] Unable to create logger: {}", e);
            e
        })?;

        Ok(Self {
            sink: Arc::new(sink),
            common: Arc::default(),
            env,
            options: options.to_vec(),
        })
    }

    /// Logger over [`LoggerConfig::production`]
    pub fn production(options: &[ConfigOption]) -> Result<Self> {
        Self::with_config(Environment::Production, LoggerConfig::production(), options)
    }

    /// Logger over [`LoggerConfig::development`]
    pub fn development(options: &[ConfigOption]) -> Result<Self> {
        Self::with_config(Environment::Development, LoggerConfig::development(), options)
    }

    #[must_use]
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    /// Options this logger was built with, in application order
    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn common(&self) -> &[Field] {
        &self.common
    }

    /// Append fields to every later record of this logger and of clones taken
    /// after this call
    ///
    /// Not meant to race with clones of the same value; do it during setup.
    pub fn add_common(&mut self, fields: impl IntoIterator<Item = Field>) {
        Arc::make_mut(&mut self.common).extend(fields);
    }

    /// A clone with extra common fields
    #[must_use]
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut child = self.clone();
        child.add_common(fields);
        child
    }

    fn with_common(&self, fields: &[Field]) -> Vec<Field> {
        let mut all = Vec::with_capacity(self.common.len() + fields.len());
        all.extend_from_slice(&self.common);
        all.extend_from_slice(fields);
        all
    }

    fn log_at(
        &self,
        level: LogLevel,
        message: String,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) {
        // Terminal levels must reach the sink even when disabled
        if level < LogLevel::DPanic && !self.sink.enabled(level) {
            return;
        }
        self.sink.emit(level, message, self.with_common(fields), caller);
    }

    /// Emit at `level`; Panic, DPanic and Fatal keep their terminal behaviour
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>, fields: &[Field]) {
        self.log_at(level, message.into(), fields, Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, fields: &[Field]) {
        self.log_at(LogLevel::Debug, message.into(), fields, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>, fields: &[Field]) {
        self.log_at(LogLevel::Info, message.into(), fields, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, fields: &[Field]) {
        self.log_at(LogLevel::Warn, message.into(), fields, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>, fields: &[Field]) {
        self.log_at(LogLevel::Error, message.into(), fields, Location::caller());
    }

    /// Logs at DPanic, then panics if the sink is in development mode
    #[track_caller]
    pub fn dpanic(&self, message: impl Into<String>, fields: &[Field]) {
        self.log_at(LogLevel::DPanic, message.into(), fields, Location::caller());
    }

    /// Logs at Panic, then panics even if the level is disabled
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>, fields: &[Field]) -> ! {
        self.log_at(LogLevel::Panic, message.into(), fields, Location::caller());
        unreachable!("the sink always unwinds after a Panic record")
    }

    /// Logs at Fatal, flushes, then runs the sink's fatal hook even if the
    /// level is disabled
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, fields: &[Field]) -> ! {
        self.sink
            .fatal(message.into(), self.with_common(fields), Location::caller())
    }

    /// Error record with an `error` field appended, when `err` is present
    #[track_caller]
    pub fn error_if(&self, err: Option<&dyn Error>, message: impl Into<String>, fields: &[Field]) {
        if let Some(err) = err {
            let mut all = self.with_common(fields);
            all.push(fields::error(err));
            self.sink
                .emit(LogLevel::Error, message.into(), all, Location::caller());
        }
    }

    /// Fatal record with an `error` field appended, when `err` is present
    #[track_caller]
    pub fn fatal_if(&self, err: Option<&dyn Error>, message: impl Into<String>, fields: &[Field]) {
        if let Some(err) = err {
            let mut all = self.with_common(fields);
            all.push(fields::error(err));
            self.sink.fatal(message.into(), all, Location::caller());
        }
    }

    /// Complete `timed` and emit it at the level its duration maps to
    ///
    /// Fields are the ones captured by the timed log, then `fields`, then
    /// `duration`. Nothing is emitted when no tier matches or `timed` is
    /// `None`. The record is attributed to the caller of this method.
    #[track_caller]
    pub fn timed_log(&self, timed: Option<&mut TimedLog>, fields: &[Field]) {
        let Some(timed) = timed else {
            return;
        };

        let duration = timed.complete();
        let Some(level) = timed.config().classify(duration) else {
            return;
        };

        let mut all = Vec::with_capacity(timed.fields().len() + fields.len() + 1);
        all.extend_from_slice(timed.fields());
        all.extend_from_slice(fields);
        all.push(fields::duration("duration", duration));
        self.log_at(level, timed.message().to_string(), &all, Location::caller());
    }

    /// Flush buffered records; failures are ignored
    pub fn sync(&self) {
        let _ = self.sink.sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::observe;
    use crate::core::options;
    use crate::core::timed::TimedLogConfig;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::time::Duration;

    fn keys(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_common_fields_prefix_call_fields() {
        let (sink, logs) = observe(LogLevel::Debug);
        let mut logger = Logger::new(sink);
        logger.add_common([Field::new("a", 1), Field::new("b", 2)]);
        logger.add_common([Field::new("c", 3)]);

        logger.info("ordered", &[Field::new("x", 1), Field::new("y", 2)]);

        let entries = logs.take_all();
        assert_eq!(keys(&entries[0].fields), ["a", "b", "c", "x", "y"]);
    }

    #[test]
    fn test_clone_isolation() {
        let (sink, logs) = observe(LogLevel::Info);
        let mut parent = Logger::new(sink);
        parent.add_common([Field::new("test", "global1")]);

        let mut before = parent.clone();
        let mut child = parent.clone();
        child.add_common([Field::new("l test", "global2")]);
        before.add_common([Field::new("before", "x")]);
        parent.add_common([Field::new("parent", "later")]);
        let after = parent.clone();

        child.info("child", &[]);
        parent.info("parent", &[]);
        before.info("before", &[]);
        after.info("after", &[]);

        let entries = logs.take_all();
        assert_eq!(keys(&entries[0].fields), ["test", "l test"]);
        assert_eq!(keys(&entries[1].fields), ["test", "parent"]);
        assert_eq!(keys(&entries[2].fields), ["test", "before"]);
        assert_eq!(keys(&entries[3].fields), ["test", "parent"]);
    }

    #[test]
    fn test_with_builds_child() {
        let (sink, logs) = observe(LogLevel::Info);
        let root = Logger::new(sink);
        let child = root.with([Field::new("request_id", "r-1")]);

        child.info("child", &[]);
        root.info("root", &[]);

        let entries = logs.take_all();
        assert_eq!(entries[0].fields.len(), 1);
        assert!(entries[1].fields.is_empty());
        assert!(root.common().is_empty());
    }

    #[test]
    fn test_level_filtering_is_sink_owned() {
        let tests = [
            (LogLevel::Debug, 5),
            (LogLevel::Info, 4),
            (LogLevel::Warn, 3),
            (LogLevel::Error, 2),
            (LogLevel::Fatal, 1),
        ];

        for (level, expect_logs) in tests {
            let (sink, logs) = observe(level);
            let logger = Logger::new(sink);

            let result = catch_unwind(AssertUnwindSafe(|| {
                logger.debug("test", &[]);
                logger.info("test", &[]);
                logger.warn("test", &[]);
                logger.error("test", &[]);
                logger.fatal("test", &[]);
            }));
            assert!(result.is_err(), "fatal must unwind under the panic hook");

            let entries = logs.take_all();
            assert_eq!(entries.len(), expect_logs, "level {}", level);
            assert_eq!(entries[0].level, level);
        }
    }

    #[test]
    fn test_error_if() {
        let (sink, logs) = observe(LogLevel::Error);
        let logger = Logger::new(sink);

        logger.error_if(None, "test", &[]);
        assert!(logs.is_empty());

        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        logger.error_if(Some(&err), "test", &[Field::new("path", "/tmp")]);

        let entries = logs.take_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(keys(&entries[0].fields), ["path", "error"]);
        assert_eq!(
            entries[0].field("error").and_then(|v| v.as_str()),
            Some("disk on fire")
        );
    }

    #[test]
    fn test_fatal_if() {
        let (sink, logs) = observe(LogLevel::Error);
        let logger = Logger::new(sink);

        logger.fatal_if(None, "test", &[]);
        assert!(logs.is_empty());

        let err = std::io::Error::new(std::io::ErrorKind::Other, "test");
        let result = catch_unwind(AssertUnwindSafe(|| {
            logger.fatal_if(Some(&err), "test", &[]);
        }));
        assert!(result.is_err());

        let entries = logs.take_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Fatal);
        assert!(entries[0].has_field("error"));
    }

    #[test]
    fn test_panic_and_dpanic() {
        let (sink, logs) = observe(LogLevel::Debug);
        let logger = Logger::new(sink);

        logger.dpanic("not development", &[]);
        let result = catch_unwind(AssertUnwindSafe(|| logger.panic("boom", &[])));
        assert!(result.is_err());

        let levels: Vec<LogLevel> = logs.take_all().iter().map(|e| e.level).collect();
        assert_eq!(levels, [LogLevel::DPanic, LogLevel::Panic]);
    }

    #[test]
    fn test_caller_attribution() {
        let (sink, logs) = observe(LogLevel::Debug);
        let logger = Logger::new(sink);

        let line = line!() + 1;
        logger.info("here", &[]);

        let entries = logs.take_all();
        let caller = entries[0].caller.as_ref().expect("caller");
        assert!(caller.file.ends_with("logger.rs"));
        assert_eq!(caller.line, line);
    }

    #[test]
    fn test_timed_log_fields_and_attribution() {
        let (sink, logs) = observe(LogLevel::Debug);
        let mut logger = Logger::new(sink);
        logger.add_common([Field::new("svc", "api")]);

        let config = TimedLogConfig {
            error: Duration::ZERO,
            warn: Duration::ZERO,
            info: Duration::ZERO,
            debug: Duration::from_nanos(1),
        };
        let mut timed = config.new_log("query", vec![Field::new("table", "users")]);
        std::thread::sleep(Duration::from_millis(1));

        let line = line!() + 1;
        logger.timed_log(Some(&mut timed), &[Field::new("rows", 3)]);

        let entries = logs.take_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Debug);
        assert_eq!(keys(&entries[0].fields), ["svc", "table", "rows", "duration"]);
        assert_eq!(entries[0].caller.as_ref().map(|c| c.line), Some(line));
    }

    #[test]
    fn test_timed_log_breaks() {
        let config = TimedLogConfig {
            error: Duration::from_millis(30),
            warn: Duration::from_millis(20),
            info: Duration::from_millis(10),
            debug: Duration::from_millis(1),
        };

        let tests = [
            (35, Some(LogLevel::Error)),
            (25, Some(LogLevel::Warn)),
            (15, Some(LogLevel::Info)),
            (5, Some(LogLevel::Debug)),
            (0, None),
        ];

        for (sleep_ms, expect) in tests {
            let (sink, logs) = observe(LogLevel::Debug);
            let logger = Logger::new(sink);

            let mut timed = config.new_log("break", vec![]);
            std::thread::sleep(Duration::from_millis(sleep_ms));
            logger.timed_log(Some(&mut timed), &[]);

            let levels: Vec<LogLevel> = logs.take_all().iter().map(|e| e.level).collect();
            assert_eq!(levels, expect.into_iter().collect::<Vec<_>>(), "{}ms", sleep_ms);

            let first = timed.duration();
            logger.timed_log(Some(&mut timed), &[]);
            assert_eq!(timed.duration(), first, "duration is fixed once completed");
        }
    }

    #[test]
    fn test_timed_log_none_is_noop() {
        let (sink, logs) = observe(LogLevel::Debug);
        let logger = Logger::new(sink);
        logger.timed_log(None, &[]);
        assert!(logs.is_empty());
    }

    #[test]
    fn test_with_config_error() {
        let result = Logger::with_config(Environment::UnitTest, LoggerConfig::default(), &[]);
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_with_config_records_options() {
        let logger = Logger::with_config(
            Environment::UnitTest,
            LoggerConfig::development(),
            &[options::with_console_encoding, options::warn],
        )
        .unwrap();

        assert_eq!(logger.environment(), Environment::UnitTest);
        assert_eq!(logger.options().len(), 2);
        assert_eq!(logger.sink().min_level(), LogLevel::Warn);
    }

    #[test]
    fn test_nop_writes_nothing() {
        let logger = Logger::nop();
        assert_eq!(logger.sink().min_level(), LogLevel::Fatal);
        assert_eq!(logger.sink().fatal_hook(), crate::core::FatalHook::Exit);
        assert!(!logger.sink().enabled(LogLevel::Error));
        logger.error("dropped", &[]);
        assert!(format!("{:?}", logger.sink()).contains("appenders: []"));
    }

    #[test]
    fn test_sync_swallows_failures() {
        Logger::nop().sync();
        Logger::production(&[options::disable_stacktrace]).unwrap().sync();
    }
}
