//! Duration-based severity escalation
//!
//! A [`TimedLog`] starts a clock when created. When it is emitted through
//! [`Logger::timed_log`](super::logger::Logger::timed_log), the measured
//! duration picks the level from the thresholds in its [`TimedLogConfig`]:
//! the slower the operation, the louder the record.

use super::{field::Field, log_level::LogLevel};
use std::time::{Duration, Instant};

/// Shared default thresholds
pub const DEFAULT_TIMED_LOG_CONFIG: TimedLogConfig = TimedLogConfig {
    error: Duration::from_secs(60),
    warn: Duration::from_secs(30),
    info: Duration::from_secs(2),
    debug: Duration::from_millis(500),
};

/// Minimum durations for each level; [`Duration::ZERO`] disables a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedLogConfig {
    pub error: Duration,
    pub warn: Duration,
    pub info: Duration,
    pub debug: Duration,
}

impl Default for TimedLogConfig {
    fn default() -> Self {
        DEFAULT_TIMED_LOG_CONFIG
    }
}

impl TimedLogConfig {
    /// Highest level whose threshold `elapsed` reaches, if any
    pub fn classify(&self, elapsed: Duration) -> Option<LogLevel> {
        [
            (self.error, LogLevel::Error),
            (self.warn, LogLevel::Warn),
            (self.info, LogLevel::Info),
            (self.debug, LogLevel::Debug),
        ]
        .into_iter()
        .find(|(threshold, _)| !threshold.is_zero() && elapsed >= *threshold)
        .map(|(_, level)| level)
    }

    /// Start timing an operation under these thresholds
    pub fn new_log(self, message: impl Into<String>, fields: Vec<Field>) -> TimedLog {
        TimedLog::new(self, message, fields)
    }
}

/// An operation being timed
///
/// ```
/// use fieldlog::prelude::*;
/// use std::time::Duration;
///
/// let (sink, logs) = observe(LogLevel::Debug);
/// let logger = Logger::new(sink);
///
/// let config = TimedLogConfig { debug: Duration::from_nanos(1), ..TimedLogConfig::default() };
/// let mut timed = config.new_log("load", vec![]);
/// std::thread::sleep(Duration::from_millis(1));
/// logger.timed_log(Some(&mut timed), &[]);
///
/// assert_eq!(logs.filter_level(LogLevel::Debug).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TimedLog {
    config: TimedLogConfig,
    message: String,
    fields: Vec<Field>,
    start: Instant,
    duration: Option<Duration>,
}

impl TimedLog {
    pub fn new(config: TimedLogConfig, message: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            config,
            message: message.into(),
            fields,
            start: Instant::now(),
            duration: None,
        }
    }

    /// Timed log under [`DEFAULT_TIMED_LOG_CONFIG`]
    pub fn with_defaults(message: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(DEFAULT_TIMED_LOG_CONFIG, message, fields)
    }

    /// Stop the clock; later calls return the first measurement
    pub fn complete(&mut self) -> Duration {
        *self.duration.get_or_insert_with(|| self.start.elapsed())
    }

    /// The recorded duration, once completed
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn config(&self) -> &TimedLogConfig {
        &self.config
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
