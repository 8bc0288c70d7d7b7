//! Time encoders
//!
//! Decide how a record's timestamp is rendered by the encoders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How timestamps are rendered
///
/// # Examples
///
/// ```
/// use fieldlog::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Floating-point seconds since the Unix epoch: `1736332245.123456`
    Epoch,

    /// Integer milliseconds since the Unix epoch: `1736332245123`
    #[serde(rename = "millis")]
    EpochMillis,

    /// Integer nanoseconds since the Unix epoch
    #[serde(rename = "nanos")]
    EpochNanos,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Epoch => format!("{:.6}", Self::epoch_seconds(datetime)),
            TimestampFormat::EpochMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::EpochNanos => Self::epoch_nanos(datetime).to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// JSON rendering: epoch formats stay numeric
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Epoch => serde_json::Number::from_f64(Self::epoch_seconds(datetime))
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TimestampFormat::EpochMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            TimestampFormat::EpochNanos => {
                serde_json::Value::Number(Self::epoch_nanos(datetime).into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }

    fn epoch_seconds(datetime: &DateTime<Utc>) -> f64 {
        datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9
    }

    fn epoch_nanos(datetime: &DateTime<Utc>) -> i64 {
        datetime
            .timestamp_nanos_opt()
            .unwrap_or_else(|| datetime.timestamp_micros().saturating_mul(1000))
    }
}
