//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their message like `format!` and forward to
//! [`Logger::log`](crate::core::Logger::log). Fields go in a bracketed list
//! before the format string. Records are attributed to the macro call site.
//!
//! # Examples
//!
//! ```
//! use fieldlog::prelude::*;
//! use fieldlog::{fields, info};
//!
//! let (sink, logs) = observe(LogLevel::Info);
//! let logger = Logger::new(sink);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments and fields
//! let port = 8080;
//! info!(logger, [fields::port(port)], "Server listening on port {}", port);
//!
//! assert_eq!(logs.len(), 2);
//! ```

/// Log a message at a given level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::nop();
/// use fieldlog::{fields, log};
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, [fields::int("code", 500)], "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, [$($field:expr),* $(,)?], $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &[$($field),*])
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &[])
    };
}

/// Log a debug-level message.
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::nop();
/// use fieldlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then terminate through the sink's fatal hook.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::observe;
    use crate::core::{Field, LogLevel, Logger};
    use crate::fields;

    #[test]
    fn test_log_macro() {
        let (sink, logs) = observe(LogLevel::Info);
        let logger = Logger::new(sink);
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        log!(logger, LogLevel::Debug, "hidden");

        let entries = logs.take_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].message, "Formatted: 42");
    }

    #[test]
    fn test_fields_before_format() {
        let (sink, logs) = observe(LogLevel::Debug);
        let mut logger = Logger::new(sink);
        logger.add_common([fields::string("svc", "api")]);

        warn!(logger, [fields::int("attempt", 3), Field::new("of", 5)], "Retry {} of {}", 3, 5);

        let entries = logs.take_all();
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "Retry 3 of 5");
        let keys: Vec<&str> = entries[0].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["svc", "attempt", "of"]);
    }

    #[test]
    fn test_level_macros() {
        let (sink, logs) = observe(LogLevel::Debug);
        let logger = Logger::new(sink);

        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100);
        error!(logger, [], "Code: {}", 500);
        let fatal = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            fatal!(logger, "Critical failure: {}", "system");
        }));
        assert!(fatal.is_err());

        let levels: Vec<LogLevel> = logs.take_all().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            [LogLevel::Debug, LogLevel::Info, LogLevel::Error, LogLevel::Fatal]
        );
    }

    #[test]
    fn test_macro_caller_is_call_site() {
        let (sink, logs) = observe(LogLevel::Debug);
        let logger = Logger::new(sink);

        let line = line!() + 1;
        info!(logger, "here");

        let entries = logs.take_all();
        let caller = entries[0].caller.as_ref().unwrap();
        assert!(caller.file.ends_with("macros.rs"));
        assert_eq!(caller.line, line);
    }
}
