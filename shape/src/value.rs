//! Field values.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::record::Record;

/// The value held in one record slot.
///
/// An unset field has no `Value` at all; see [`Record`].
///
/// ## Examples
///
/// ```
/// use shape::Value;
///
/// assert_eq!(Value::from("x"), Value::String("x".into()));
/// assert_eq!(Value::from(50), Value::Integer(50));
/// assert_eq!(Value::enumeration("ASC").as_str(), Some("ASC"));
/// assert!(Value::List(vec![]).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Boolean(bool),
    /// Timestamp with its original offset.
    Time(DateTime<FixedOffset>),
    /// Enum value, canonical when known.
    Enum(String),
    /// Nested record.
    Record(Record),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed mapping.
    Map(BTreeMap<String, Value>),
    /// Free-form JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Creates an enum value.
    pub fn enumeration(value: impl Into<String>) -> Self {
        Self::Enum(value.into())
    }

    /// Short kind label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Time(_) => "time",
            Self::Enum(_) => "enum",
            Self::Record(_) => "record",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Json(_) => "json",
        }
    }

    /// Empty strings, empty enums and empty collections count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) | Self::Enum(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// String or enum contents.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Integer contents.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Float contents; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Boolean contents.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Timestamp contents.
    pub fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Nested record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// List items.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map entries.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Renders a scalar as it appears in a path, query string or header.
    ///
    /// Returns `None` for records, lists, maps and JSON blobs.
    pub fn to_wire_string(&self) -> Option<String> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Time(t) => Some(format_time(t)),
            Self::Record(_) | Self::List(_) | Self::Map(_) | Self::Json(_) => None,
        }
    }
}

/// Formats a timestamp as RFC 3339, keeping sub-second digits.
pub fn format_time(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Time(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}
