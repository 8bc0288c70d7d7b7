//! Configuration options
//!
//! An option is a plain function that mutates a [`LoggerConfig`]. Options are
//! applied in order, so a later option overrides an earlier one wherever
//! they touch the same setting.
//!
//! ```
//! use fieldlog::core::options::{self, ConfigOption};
//! use fieldlog::core::{LoggerConfig, LogLevel};
//!
//! let mut config = LoggerConfig::production();
//! let opts: [ConfigOption; 3] = [options::debug, options::with_console_encoding, options::warn];
//! config.apply(&opts);
//! assert_eq!(config.level, LogLevel::Warn);
//! assert_eq!(config.encoding, "console");
//! ```

use super::config::LoggerConfig;
use super::encoder::{CallerEncoder, DurationEncoder, EncoderConfig, Encoding, LevelEncoder};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;

pub type ConfigOption = fn(&mut LoggerConfig);

pub fn debug(config: &mut LoggerConfig) {
    config.level = LogLevel::Debug;
}

pub fn info(config: &mut LoggerConfig) {
    config.level = LogLevel::Info;
}

pub fn warn(config: &mut LoggerConfig) {
    config.level = LogLevel::Warn;
}

pub fn error(config: &mut LoggerConfig) {
    config.level = LogLevel::Error;
}

pub fn dpanic(config: &mut LoggerConfig) {
    config.level = LogLevel::DPanic;
}

pub fn panic(config: &mut LoggerConfig) {
    config.level = LogLevel::Panic;
}

pub fn fatal(config: &mut LoggerConfig) {
    config.level = LogLevel::Fatal;
}

/// Human-readable console output with the development key set
pub fn with_console_encoding(config: &mut LoggerConfig) {
    config.encoding = Encoding::Console.to_string();
    config.encoder_config = EncoderConfig::development();
}

/// JSON shaped for Google Cloud Logging's `LogEntry` payload
pub fn with_google_encoding(config: &mut LoggerConfig) {
    config.encoding = Encoding::Json.to_string();
    config.encoder_config = EncoderConfig {
        time_key: "timestamp".to_string(),
        level_key: "severity".to_string(),
        name_key: "logName".to_string(),
        caller_key: "caller".to_string(),
        message_key: "textPayload".to_string(),
        stacktrace_key: "trace".to_string(),
        line_ending: "\n".to_string(),
        level_encoder: LevelEncoder::Google,
        time_encoder: TimestampFormat::Iso8601,
        duration_encoder: DurationEncoder::Seconds,
        caller_encoder: CallerEncoder::Short,
    };
}

pub fn disable_stacktrace(config: &mut LoggerConfig) {
    config.disable_stacktrace = true;
}

pub fn disable_caller(config: &mut LoggerConfig) {
    config.disable_caller = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        let tests: [(&str, ConfigOption, LogLevel); 7] = [
            ("debug", debug, LogLevel::Debug),
            ("info", info, LogLevel::Info),
            ("warn", warn, LogLevel::Warn),
            ("error", error, LogLevel::Error),
            ("dpanic", dpanic, LogLevel::DPanic),
            ("panic", panic, LogLevel::Panic),
            ("fatal", fatal, LogLevel::Fatal),
        ];

        let mut config = LoggerConfig::default();
        for (name, option, want) in tests {
            option(&mut config);
            assert_eq!(config.level, want, "option {}", name);
        }
    }

    #[test]
    fn test_console_encoding() {
        let mut config = LoggerConfig::default();
        with_console_encoding(&mut config);
        assert_eq!(config.encoding, "console");
        assert_eq!(config.encoder_config, EncoderConfig::development());
    }

    #[test]
    fn test_google_encoding() {
        let mut config = LoggerConfig::default();
        with_google_encoding(&mut config);

        assert_eq!(config.encoding, "json");
        let enc = &config.encoder_config;
        assert_eq!(enc.time_key, "timestamp");
        assert_eq!(enc.level_key, "severity");
        assert_eq!(enc.name_key, "logName");
        assert_eq!(enc.caller_key, "caller");
        assert_eq!(enc.message_key, "textPayload");
        assert_eq!(enc.stacktrace_key, "trace");
        assert_eq!(enc.line_ending, "\n");
        assert_eq!(enc.level_encoder, LevelEncoder::Google);
    }

    #[test]
    fn test_switches() {
        let mut config = LoggerConfig::default();
        disable_stacktrace(&mut config);
        disable_caller(&mut config);
        assert!(config.disable_stacktrace);
        assert!(config.disable_caller);
    }

    #[test]
    fn test_later_option_wins() {
        let mut config = LoggerConfig::default();
        config.apply(&[with_google_encoding, info, with_console_encoding, error]);
        assert_eq!(config.encoding, "console");
        assert_eq!(config.level, LogLevel::Error);

        let mut config = LoggerConfig::default();
        config.apply(&[with_console_encoding, with_google_encoding]);
        assert_eq!(config.encoding, "json");
    }
}
