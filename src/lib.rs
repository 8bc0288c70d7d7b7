//! # fieldlog
//!
//! A structured logging facade with inheritable common fields.
//!
//! ## Features
//!
//! - **Common Fields**: Every logger carries an ordered list of fields that
//!   prefix its records; clones extend their own copy without touching others
//! - **Environment Setup**: One call configures the process-wide logger for
//!   production, development or test use
//! - **Timed Logs**: The measured duration of an operation picks the level
//! - **Observable**: An in-memory sink for asserting on emitted records
//!
//! ```
//! use fieldlog::prelude::*;
//! use fieldlog::fields;
//!
//! let mut logger = Logger::development(&[options::warn]).unwrap();
//! logger.add_common([fields::string("component", "scheduler")]);
//! logger.warn("queue is backing up", &[fields::int("depth", 4096)]);
//! ```

pub mod appenders;
pub mod core;
pub mod environment;
pub mod fields;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{observe, ConsoleAppender, FileAppender, ObservedLogs, ObserverAppender};
    pub use crate::core::options::{self, ConfigOption};
    pub use crate::core::{
        Appender, Encoder, EncoderConfig, Encoding, FatalHook, Field, FieldValue, LogEntry,
        LogLevel, Logger, LoggerConfig, LoggerError, Result, Sink, TimedLog, TimedLogConfig,
    };
    pub use crate::environment::Environment;
}

pub use crate::appenders::{observe, ConsoleAppender, FileAppender, ObservedLogs, ObserverAppender};
pub use crate::core::{
    Appender, Caller, ConfigOption, Encoder, EncoderConfig, Encoding, FatalHook, Field, FieldValue,
    LogEntry, LogLevel, Logger, LoggerConfig, LoggerError, Result, Sink, SinkBuilder, TimedLog,
    TimedLogConfig, TimestampFormat, DEFAULT_TIMED_LOG_CONFIG,
};
pub use crate::environment::Environment;
