use std::str::FromStr;

use crate::convert::ValueConverter;
use crate::error::PrestoLinkError;

/// Declared column types understood by the client.
///
/// The wire format only carries JSON's native value kinds, so the declared
/// type is the only thing that tells a row decoder what a value means.
/// Parsing is case-insensitive and accepts the parameterized spellings the
/// server uses (`varchar(32)`, `decimal(10, 2)`, `timestamp(3) with time zone`,
/// `map(varchar, varchar)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Varchar,
    Char,
    BigInt,
    Integer,
    SmallInt,
    TinyInt,
    Double,
    Real,
    Boolean,
    Timestamp,
    TimestampWithTimeZone,
    Date,
    Decimal,
    Json,
    Varbinary,
    /// `map(varchar,varchar)`
    MapVarchar,
    /// `array(varchar)`
    ArrayVarchar,
}

impl ColumnType {
    /// The converter that decodes raw values of this type.
    ///
    /// Total over every variant: a declared type that parses always has a
    /// converter.
    pub fn converter(&self) -> ValueConverter {
        match self {
            ColumnType::Varchar
            | ColumnType::Char
            | ColumnType::Date
            | ColumnType::Decimal
            | ColumnType::Json => ValueConverter::Varchar,
            ColumnType::BigInt
            | ColumnType::Integer
            | ColumnType::SmallInt
            | ColumnType::TinyInt => ValueConverter::BigInt,
            ColumnType::Double | ColumnType::Real => ValueConverter::Double,
            ColumnType::Boolean => ValueConverter::Boolean,
            ColumnType::Timestamp => ValueConverter::Timestamp,
            ColumnType::TimestampWithTimeZone => ValueConverter::TimestampWithTimeZone,
            ColumnType::Varbinary => ValueConverter::Varbinary,
            ColumnType::MapVarchar => ValueConverter::MapVarchar,
            ColumnType::ArrayVarchar => ValueConverter::ArrayVarchar,
        }
    }

    /// Canonical server spelling of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Varchar => "varchar",
            ColumnType::Char => "char",
            ColumnType::BigInt => "bigint",
            ColumnType::Integer => "integer",
            ColumnType::SmallInt => "smallint",
            ColumnType::TinyInt => "tinyint",
            ColumnType::Double => "double",
            ColumnType::Real => "real",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamp",
            ColumnType::TimestampWithTimeZone => "timestamp with time zone",
            ColumnType::Date => "date",
            ColumnType::Decimal => "decimal",
            ColumnType::Json => "json",
            ColumnType::Varbinary => "varbinary",
            ColumnType::MapVarchar => "map(varchar,varchar)",
            ColumnType::ArrayVarchar => "array(varchar)",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Split `name(args) rest` into `(name, Some(args), rest)`.
fn split_parameters(normalized: &str) -> (&str, Option<&str>, &str) {
    match (normalized.find('('), normalized.rfind(')')) {
        (Some(open), Some(close)) if open < close => (
            &normalized[..open],
            Some(&normalized[open + 1..close]),
            normalized[close + 1..].trim(),
        ),
        _ => (normalized, None, ""),
    }
}

impl FromStr for ColumnType {
    type Err = PrestoLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let unsupported = || PrestoLinkError::UnsupportedType(s.to_string());

        // Parameter lists are compared without whitespace: "map(varchar, varchar)"
        let (base, params, suffix) = split_parameters(&lowered);
        let params: Option<String> =
            params.map(|p| p.chars().filter(|c| !c.is_whitespace()).collect());
        let base = base.trim();

        let column_type = match (base, params.as_deref(), suffix) {
            ("varchar", _, "") => ColumnType::Varchar,
            ("char", _, "") => ColumnType::Char,
            ("bigint", None, "") => ColumnType::BigInt,
            ("integer" | "int", None, "") => ColumnType::Integer,
            ("smallint", None, "") => ColumnType::SmallInt,
            ("tinyint", None, "") => ColumnType::TinyInt,
            ("double", None, "") => ColumnType::Double,
            ("real", None, "") => ColumnType::Real,
            ("boolean", None, "") => ColumnType::Boolean,
            ("date", None, "") => ColumnType::Date,
            ("decimal", _, "") => ColumnType::Decimal,
            ("json", None, "") => ColumnType::Json,
            ("varbinary", None, "") => ColumnType::Varbinary,
            ("timestamp", _, "") => ColumnType::Timestamp,
            ("timestamp", _, "with time zone") => ColumnType::TimestampWithTimeZone,
            ("timestamp with time zone", None, "") => ColumnType::TimestampWithTimeZone,
            ("map", Some("varchar,varchar"), "") => ColumnType::MapVarchar,
            ("array", Some("varchar"), "") => ColumnType::ArrayVarchar,
            _ => return Err(unsupported()),
        };
        Ok(column_type)
    }
}
