//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod encoder;
pub mod error;
pub mod field;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod options;
pub mod sink;
pub mod timed;
pub mod timestamp;

pub use appender::Appender;
pub use config::LoggerConfig;
pub use encoder::{CallerEncoder, DurationEncoder, Encoder, EncoderConfig, Encoding, LevelEncoder};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use options::ConfigOption;
pub use sink::{FatalHook, Sink, SinkBuilder};
pub use timed::{TimedLog, TimedLogConfig, DEFAULT_TIMED_LOG_CONFIG};
pub use timestamp::TimestampFormat;
