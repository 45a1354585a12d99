use std::collections::HashMap;

use chrono::{DateTime, Local};
use chrono_tz::Tz;

/// A decoded cell value, typed according to its column's declared type.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TypedValue {
    /// SQL NULL
    #[default]
    Null,
    Varchar(String),
    Boolean(bool),
    BigInt(i64),
    Double(f64),
    /// Zone-less timestamp, read in the process's local zone
    Timestamp(DateTime<Local>),
    TimestampWithTimeZone(DateTime<Tz>),
    Varbinary(Vec<u8>),
    MapVarchar(HashMap<String, String>),
    ArrayVarchar(Vec<String>),
}

impl TypedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Varchar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TypedValue::Varbinary(v) => Some(v),
            _ => None,
        }
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Varchar(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Varchar(value.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::BigInt(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Double(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}
