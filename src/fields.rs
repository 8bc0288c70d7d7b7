//! Field constructors for common log data
//!
//! ```
//! use fieldlog::fields;
//!
//! let f = fields::prefix("session", fields::user_agent("curl/8.4"));
//! assert_eq!(f.key, "session:user-agent");
//! ```

use crate::core::{Field, FieldValue};
use std::error::Error;
use std::time::Duration;

/// Rewrite `field`'s key to `prefix:key`, grouping related fields
pub fn prefix(prefix: &str, mut field: Field) -> Field {
    field.key = format!("{}:{}", prefix, field.key);
    field
}

/// The `error` field
pub fn error(err: &dyn Error) -> Field {
    Field {
        key: "error".to_string(),
        value: FieldValue::Error(err.to_string()),
    }
}

/// The `error` field, or a skipped field when there is no error
pub fn error_opt(err: Option<&dyn Error>) -> Field {
    err.map_or_else(Field::skip, error)
}

/// `key:type` holding the type name of `value`
pub fn interface_type<T: ?Sized>(key: &str, _value: &T) -> Field {
    Field::new(format!("{}:type", key), std::any::type_name::<T>())
}

pub fn ip(ip: &str) -> Field {
    Field::new("ip", ip)
}

pub fn user_agent(ua: &str) -> Field {
    Field::new("user-agent", ua)
}

pub fn url(input: &str) -> Field {
    Field::new("url", input)
}

pub fn port_string(input: &str) -> Field {
    Field::new("port", input)
}

pub fn port(input: u16) -> Field {
    Field::new("port", input)
}

pub fn method(input: &str) -> Field {
    Field::new("method", input)
}

pub fn string(key: &str, value: impl Into<String>) -> Field {
    Field::new(key, value.into())
}

pub fn int(key: &str, value: i64) -> Field {
    Field::new(key, value)
}

pub fn uint(key: &str, value: u64) -> Field {
    Field::new(key, value)
}

pub fn float(key: &str, value: f64) -> Field {
    Field::new(key, value)
}

pub fn bool(key: &str, value: bool) -> Field {
    Field::new(key, value)
}

pub fn duration(key: &str, value: Duration) -> Field {
    Field::new(key, value)
}
