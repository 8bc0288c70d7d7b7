//! Process-wide logger registry
//!
//! One optional [`Logger`] lives in a global slot. [`setup`] fills it from an
//! [`Environment`], [`replace`] swaps it wholesale and [`logger`] hands out a
//! clone. Readers never see a half-installed logger: the slot is replaced
//! under a write lock and read by cloning under a read lock.
//!
//! ```
//! use fieldlog::environment::Environment;
//! use fieldlog::global;
//!
//! global::setup(Environment::UnitTest).unwrap();
//! let logs = global::observer_for_test().unwrap();
//!
//! global::logger().info("ready", &[]);
//! assert_eq!(logs.filter_message("ready").len(), 1);
//! ```

use crate::appenders::{observe, ObservedLogs};
use crate::core::{
    options::{self, ConfigOption},
    Field, LogLevel, Logger, LoggerConfig, Result, TimedLog,
};
use crate::environment::{self, Environment};
use parking_lot::RwLock;

static GLOBAL: RwLock<Option<Logger>> = parking_lot::const_rwlock(None);

/// Options for integration tests, or any environment with debug forced
const STRUCTURED_DEBUG: [ConfigOption; 3] = [
    options::with_google_encoding,
    options::disable_stacktrace,
    options::debug,
];

/// Options for development and unit test environments
const CONSOLE_DEBUG: [ConfigOption; 2] = [options::with_console_encoding, options::debug];

/// Options for deployed environments
const STRUCTURED_INFO: [ConfigOption; 3] = [
    options::with_google_encoding,
    options::disable_stacktrace,
    options::info,
];

/// Install `logger`, or clear the slot with `None`
pub fn replace(logger: Option<Logger>) {
    *GLOBAL.write() = logger;
}

/// Clone of the installed logger, if any
pub fn current() -> Option<Logger> {
    GLOBAL.read().clone()
}

/// The installed logger
///
/// # Panics
///
/// When nothing is installed. Call [`setup`] or [`replace`] first.
#[track_caller]
pub fn logger() -> Logger {
    match current() {
        Some(logger) => logger,
        None => panic!("no global logger installed; call global::setup or global::replace first"),
    }
}

/// Build the logger `env` calls for without installing it
pub fn setup_logger(env: Environment) -> Result<Logger> {
    if env.is_integration_test() || environment::debug_logging_forced() {
        Logger::with_config(env, LoggerConfig::production(), &STRUCTURED_DEBUG)
    } else if env.is_dev_or_test() || env.is_unit_test() {
        Logger::with_config(env, LoggerConfig::development(), &CONSOLE_DEBUG)
    } else {
        Logger::with_config(env, LoggerConfig::production(), &STRUCTURED_INFO)
    }
}

/// Build and install the logger for `env`
///
/// On error the installed logger is left as it was.
pub fn setup(env: Environment) -> Result<()> {
    let logger = setup_logger(env)?;
    replace(Some(logger));
    Ok(())
}

/// Swap the installed logger for one that records into memory
///
/// Returns `None`, leaving the slot untouched, when nothing is installed or
/// the installed logger's environment is not a development or test one. The
/// outgoing logger is flushed first; the replacement keeps its environment
/// but none of its common fields.
pub fn observer_for_test() -> Option<ObservedLogs> {
    let mut slot = GLOBAL.write();
    let outgoing = slot.as_ref()?;
    let env = outgoing.environment();
    if !env.is_dev_or_test() {
        return None;
    }

    outgoing.sync();
    let (sink, logs) = observe(LogLevel::Debug);
    *slot = Some(Logger::new(sink).with_environment(env));
    Some(logs)
}

/// [`Logger::timed_log`] on the installed logger; nothing happens when the
/// slot is empty
#[track_caller]
pub fn timed_log(timed: Option<&mut TimedLog>, fields: &[Field]) {
    if let Some(logger) = current() {
        logger.timed_log(timed, fields);
    }
}
