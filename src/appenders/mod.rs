//! Appender implementations

pub mod console;
pub mod file;
pub mod observer;

pub use console::{ConsoleAppender, Stream};
pub use file::FileAppender;
pub use observer::{observe, ObservedLogs, ObserverAppender};

// Re-export the trait alongside its implementations
pub use crate::core::Appender;
