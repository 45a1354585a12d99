//! Typed decoding of raw JSON cell values.
//!
//! Rows arrive as plain JSON: numbers are all one numeric kind, and temporal,
//! binary and floating-point sentinel values are encoded as strings. Each
//! declared column type selects one [`ValueConverter`], which re-derives the
//! logical value from the raw JSON and its declared type.

use std::collections::HashMap;

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde_json::Value as JsonValue;

use crate::models::TypedValue;

/// Wire layout of `timestamp` values; fractional digits are optional.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A value that could not be coerced to its column's declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to convert {value} into {expected}")]
pub struct ConversionError {
    /// Name of the target type
    pub expected: &'static str,
    /// JSON rendering of the offending raw value
    pub value: String,
}

impl ConversionError {
    pub fn new(expected: &'static str, value: &JsonValue) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

/// Conversion rule for one declared column type.
///
/// Stateless and `Copy`; a single instance serves every column and every
/// cursor that declares the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueConverter {
    Varchar,
    Boolean,
    BigInt,
    Double,
    Timestamp,
    TimestampWithTimeZone,
    Varbinary,
    MapVarchar,
    ArrayVarchar,
}

impl ValueConverter {
    /// Name used in conversion errors
    pub fn target(&self) -> &'static str {
        match self {
            ValueConverter::Varchar => "varchar",
            ValueConverter::Boolean => "boolean",
            ValueConverter::BigInt => "bigint",
            ValueConverter::Double => "double",
            ValueConverter::Timestamp => "timestamp",
            ValueConverter::TimestampWithTimeZone => "timestamp with time zone",
            ValueConverter::Varbinary => "varbinary",
            ValueConverter::MapVarchar => "map(varchar,varchar)",
            ValueConverter::ArrayVarchar => "array(varchar)",
        }
    }

    /// Convert one raw value. JSON `null` always yields [`TypedValue::Null`].
    pub fn convert(&self, raw: &JsonValue) -> Result<TypedValue, ConversionError> {
        if raw.is_null() {
            return Ok(TypedValue::Null);
        }
        let fail = || ConversionError::new(self.target(), raw);

        match self {
            ValueConverter::Varchar => match raw {
                JsonValue::String(s) => Ok(TypedValue::Varchar(s.clone())),
                _ => Err(fail()),
            },
            ValueConverter::Boolean => match raw {
                JsonValue::Bool(b) => Ok(TypedValue::Boolean(*b)),
                _ => Err(fail()),
            },
            ValueConverter::BigInt => convert_bigint(raw).map(TypedValue::BigInt).ok_or_else(fail),
            ValueConverter::Double => convert_double(raw).map(TypedValue::Double).ok_or_else(fail),
            ValueConverter::Timestamp => raw
                .as_str()
                .and_then(parse_local_timestamp)
                .map(TypedValue::Timestamp)
                .ok_or_else(fail),
            ValueConverter::TimestampWithTimeZone => raw
                .as_str()
                .and_then(parse_zoned_timestamp)
                .map(TypedValue::TimestampWithTimeZone)
                .ok_or_else(fail),
            ValueConverter::Varbinary => raw
                .as_str()
                .and_then(|s| general_purpose::STANDARD.decode(s).ok())
                .map(TypedValue::Varbinary)
                .ok_or_else(fail),
            ValueConverter::MapVarchar => {
                let object = raw.as_object().ok_or_else(fail)?;
                let mut map = HashMap::with_capacity(object.len());
                for (key, value) in object {
                    let value = value.as_str().ok_or_else(fail)?;
                    map.insert(key.clone(), value.to_string());
                }
                Ok(TypedValue::MapVarchar(map))
            }
            ValueConverter::ArrayVarchar => {
                let items = raw.as_array().ok_or_else(fail)?;
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(item.as_str().ok_or_else(fail)?.to_string());
                }
                Ok(TypedValue::ArrayVarchar(values))
            }
        }
    }
}

/// Integral numbers pass through; fractional ones are truncated toward zero.
///
/// Numbers outside the `i64` range are rejected rather than saturated.
fn convert_bigint(raw: &JsonValue) -> Option<i64> {
    let JsonValue::Number(number) = raw else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let truncated = number.as_f64()?.trunc();
    (i64::MIN as f64..i64::MAX as f64)
        .contains(&truncated)
        .then_some(truncated as i64)
}

fn convert_double(raw: &JsonValue) -> Option<f64> {
    match raw {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => match s.as_str() {
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            _ => None,
        },
        _ => None,
    }
}

/// Read a zone-less timestamp as wall time in the process's local zone.
///
/// Wall times skipped by a DST transition do not exist locally and are
/// rejected; ambiguous ones resolve to the earlier instant.
fn parse_local_timestamp(s: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Parse `<date> <time> <zone>`.
///
/// A blank zone (`"... "`) and a missing zone part both mean UTC.
fn parse_zoned_timestamp(s: &str) -> Option<DateTime<Tz>> {
    let mut parts = s.splitn(3, ' ');
    let date = parts.next()?;
    let time = parts.next()?;
    let naive =
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), TIMESTAMP_FORMAT).ok()?;

    let tz: Tz = match parts.next() {
        None | Some("") => Tz::UTC,
        Some(zone) => zone.parse().ok()?,
    };
    tz.from_local_datetime(&naive).earliest()
}
