//! Backend configuration
//!
//! A [`LoggerConfig`] describes a sink before it exists. Options mutate it,
//! [`LoggerConfig::build`] validates it and produces the [`Sink`].

use super::appender::Appender;
use super::encoder::{Encoder, EncoderConfig, Encoding};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::sink::Sink;
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum enabled level
    pub level: LogLevel,
    /// Development mode: DPanic panics and stacktraces start at Warn
    pub development: bool,
    /// Do not annotate records with the calling file and line
    pub disable_caller: bool,
    /// Do not capture stacktraces
    pub disable_stacktrace: bool,
    /// `json` or `console`
    pub encoding: String,
    pub encoder_config: EncoderConfig,
    /// `stdout`, `stderr` or file paths
    pub output_paths: Vec<String>,
}

impl Default for LoggerConfig {
    /// An empty configuration; it does not build until an encoding and an
    /// output are set.
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            development: false,
            disable_caller: false,
            disable_stacktrace: false,
            encoding: String::new(),
            encoder_config: EncoderConfig::default(),
            output_paths: Vec::new(),
        }
    }
}

impl LoggerConfig {
    /// Info level, JSON to stderr, stacktraces from Error
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            development: false,
            disable_caller: false,
            disable_stacktrace: false,
            encoding: Encoding::Json.to_string(),
            encoder_config: EncoderConfig::production(),
            output_paths: vec!["stderr".to_string()],
        }
    }

    /// Debug level, console encoding to stderr, stacktraces from Warn
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            development: true,
            disable_caller: false,
            disable_stacktrace: false,
            encoding: Encoding::Console.to_string(),
            encoder_config: EncoderConfig::development(),
            output_paths: vec!["stderr".to_string()],
        }
    }

    /// Load a configuration from JSON; missing keys take the empty defaults
    ///
    /// # Example
    ///
    /// ```
    /// use fieldlog::core::LoggerConfig;
    ///
    /// let config = LoggerConfig::from_json(
    ///     r#"{"level": "warn", "encoding": "json", "output_paths": ["stdout"]}"#,
    /// ).unwrap();
    /// assert!(config.build().is_ok());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply options in order; later options win on overlapping settings
    pub fn apply(&mut self, options: &[super::options::ConfigOption]) {
        for option in options {
            option(self);
        }
    }

    /// Validate the configuration and build a sink from it
    pub fn build(&self) -> Result<Sink> {
        let encoding: Encoding = self.encoding.parse()?;
        if self.output_paths.is_empty() {
            return Err(LoggerError::config("output", "no output paths configured"));
        }

        let encoder = Encoder::new(encoding, self.encoder_config.clone());
        let mut builder = Sink::builder()
            .min_level(self.level)
            .development(self.development)
            .disable_caller(self.disable_caller)
            .disable_stacktrace(self.disable_stacktrace);

        for path in &self.output_paths {
            builder = builder.boxed_appender(Self::open_output(path, &encoder)?);
        }

        Ok(builder.build())
    }

    fn open_output(path: &str, encoder: &Encoder) -> Result<Box<dyn Appender>> {
        match path {
            "stdout" => Ok(Box::new(ConsoleAppender::stdout(encoder.clone()))),
            "stderr" => Ok(Box::new(ConsoleAppender::stderr(encoder.clone()))),
            "" => Err(LoggerError::config("output", "empty output path")),
            file => FileAppender::new(file, encoder.clone())
                .map(|appender| Box::new(appender) as Box<dyn Appender>)
                .map_err(|e| LoggerError::config("output", format!("cannot open {:?}: {}", file, e))),
        }
    }
}
