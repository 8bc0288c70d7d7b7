//! Record encoders
//!
//! Two encodings are available:
//! - `json`: one JSON object per record, keys taken from [`EncoderConfig`]
//! - `console`: tab-separated, human-readable line with the fields as a JSON object

use super::error::LoggerError;
use super::field::{Field, FieldValue};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Name of a registered encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Console,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Console => "console",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Encoding::Json),
            "console" => Ok(Encoding::Console),
            other => Err(LoggerError::config(
                "encoding",
                format!("no encoder registered for name {:?}", other),
            )),
        }
    }
}

/// How the level is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelEncoder {
    /// `info`
    #[default]
    Lowercase,
    /// `INFO`
    Capital,
    /// `INFO` wrapped in terminal colors
    CapitalColor,
    /// Google Cloud Logging severities (`WARNING`, `CRITICAL`, ...)
    Google,
}

impl LevelEncoder {
    pub fn encode(&self, level: LogLevel) -> String {
        match self {
            LevelEncoder::Lowercase => level.to_lowercase_str().to_string(),
            LevelEncoder::Capital => level.to_str().to_string(),
            LevelEncoder::Google => level.google_severity().to_string(),
            LevelEncoder::CapitalColor => Self::colorize(level),
        }
    }

    #[cfg(feature = "console")]
    fn colorize(level: LogLevel) -> String {
        use colored::Colorize;
        level.to_str().color(level.color_code()).to_string()
    }

    #[cfg(not(feature = "console"))]
    fn colorize(level: LogLevel) -> String {
        level.to_str().to_string()
    }
}

/// How `Duration` field values are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationEncoder {
    /// Floating-point seconds
    #[default]
    Seconds,
    /// Floating-point milliseconds
    Millis,
    /// Integer nanoseconds
    Nanos,
    /// Human-readable string, e.g. `1.5s`
    String,
}

impl DurationEncoder {
    pub fn encode(&self, duration: Duration) -> serde_json::Value {
        match self {
            DurationEncoder::Seconds => float_value(duration.as_secs_f64()),
            DurationEncoder::Millis => float_value(duration.as_secs_f64() * 1000.0),
            DurationEncoder::Nanos => {
                let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
                serde_json::Value::Number(nanos.into())
            }
            DurationEncoder::String => serde_json::Value::String(format!("{:?}", duration)),
        }
    }
}

/// How the caller location is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerEncoder {
    /// `dir/file.rs:line`
    #[default]
    Short,
    /// Full path as reported by the compiler
    Full,
}

/// Keys and value encoders used when rendering a record
///
/// An empty key omits that element from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub message_key: String,
    pub level_key: String,
    pub time_key: String,
    /// Reserved: loggers carry no name, so neither encoder renders this key
    pub name_key: String,
    pub caller_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
    pub level_encoder: LevelEncoder,
    pub time_encoder: TimestampFormat,
    pub duration_encoder: DurationEncoder,
    pub caller_encoder: CallerEncoder,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            message_key: String::new(),
            level_key: String::new(),
            time_key: String::new(),
            name_key: String::new(),
            caller_key: String::new(),
            stacktrace_key: String::new(),
            line_ending: "\n".to_string(),
            level_encoder: LevelEncoder::default(),
            time_encoder: TimestampFormat::default(),
            duration_encoder: DurationEncoder::default(),
            caller_encoder: CallerEncoder::default(),
        }
    }
}

impl EncoderConfig {
    /// Keys and encoders for machine-readable production output
    pub fn production() -> Self {
        Self {
            message_key: "msg".to_string(),
            level_key: "level".to_string(),
            time_key: "ts".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            line_ending: "\n".to_string(),
            level_encoder: LevelEncoder::Lowercase,
            time_encoder: TimestampFormat::Epoch,
            duration_encoder: DurationEncoder::Seconds,
            caller_encoder: CallerEncoder::Short,
        }
    }

    /// Keys and encoders for human-readable development output
    pub fn development() -> Self {
        Self {
            message_key: "M".to_string(),
            level_key: "L".to_string(),
            time_key: "T".to_string(),
            name_key: "N".to_string(),
            caller_key: "C".to_string(),
            stacktrace_key: "S".to_string(),
            line_ending: "\n".to_string(),
            level_encoder: LevelEncoder::Capital,
            time_encoder: TimestampFormat::Iso8601,
            duration_encoder: DurationEncoder::String,
            caller_encoder: CallerEncoder::Short,
        }
    }
}

/// Renders records with a fixed encoding and key set
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self { encoding, config }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Render one record, line ending included
    pub fn encode(&self, entry: &LogEntry) -> String {
        let mut line = match self.encoding {
            Encoding::Json => self.encode_json(entry),
            Encoding::Console => self.encode_console(entry),
        };
        line.push_str(&self.config.line_ending);
        line
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let cfg = &self.config;
        let mut json_obj = serde_json::Map::new();

        if !cfg.level_key.is_empty() {
            json_obj.insert(
                cfg.level_key.clone(),
                serde_json::Value::String(cfg.level_encoder.encode(entry.level)),
            );
        }
        if !cfg.time_key.is_empty() {
            json_obj.insert(
                cfg.time_key.clone(),
                cfg.time_encoder.to_json_value(&entry.timestamp),
            );
        }
        if let (false, Some(caller)) = (cfg.caller_key.is_empty(), entry.caller.as_ref()) {
            json_obj.insert(
                cfg.caller_key.clone(),
                serde_json::Value::String(self.render_caller(caller)),
            );
        }
        if !cfg.message_key.is_empty() {
            json_obj.insert(
                cfg.message_key.clone(),
                serde_json::Value::String(entry.message.clone()),
            );
        }

        self.insert_fields(&mut json_obj, &entry.fields);

        if let (false, Some(trace)) = (cfg.stacktrace_key.is_empty(), entry.stacktrace.as_ref()) {
            json_obj.insert(
                cfg.stacktrace_key.clone(),
                serde_json::Value::String(trace.clone()),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let cfg = &self.config;
        let mut parts = Vec::with_capacity(5);

        if !cfg.time_key.is_empty() {
            parts.push(cfg.time_encoder.format(&entry.timestamp));
        }
        if !cfg.level_key.is_empty() {
            parts.push(cfg.level_encoder.encode(entry.level));
        }
        if let (false, Some(caller)) = (cfg.caller_key.is_empty(), entry.caller.as_ref()) {
            parts.push(self.render_caller(caller));
        }
        if !cfg.message_key.is_empty() {
            parts.push(entry.message.clone());
        }

        let mut context = serde_json::Map::new();
        self.insert_fields(&mut context, &entry.fields);
        if !context.is_empty() {
            parts.push(
                serde_json::to_string(&serde_json::Value::Object(context)).unwrap_or_default(),
            );
        }

        let mut line = parts.join("\t");
        if let (false, Some(trace)) = (cfg.stacktrace_key.is_empty(), entry.stacktrace.as_ref()) {
            line.push('\n');
            line.push_str(trace.trim_end());
        }
        line
    }

    /// Later fields overwrite earlier ones with the same key
    fn insert_fields(
        &self,
        target: &mut serde_json::Map<String, serde_json::Value>,
        fields: &[Field],
    ) {
        for field in fields.iter().filter(|f| !f.is_skip()) {
            target.insert(field.key.clone(), self.field_to_json(&field.value));
        }
    }

    fn field_to_json(&self, value: &FieldValue) -> serde_json::Value {
        match value {
            FieldValue::String(s) | FieldValue::Error(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => float_value(*f),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Duration(d) => self.config.duration_encoder.encode(*d),
            FieldValue::Skip => serde_json::Value::Null,
        }
    }

    fn render_caller(&self, caller: &super::log_entry::Caller) -> String {
        match self.config.caller_encoder {
            CallerEncoder::Short => caller.short(),
            CallerEncoder::Full => caller.full(),
        }
    }
}

fn float_value(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
