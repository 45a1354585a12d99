//! Output formatters for query results
//!
//! Renders decoded rows as aligned columns (`tabular`) or tab-separated
//! values (`tsv`), one header line followed by one line per row.

use base64::{engine::general_purpose, Engine as _};
use chrono::SecondsFormat;
use clap::ValueEnum;
use presto_link::TypedValue;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Separator between padded columns in tabular output
const COLUMN_GAP: &str = "  ";

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Columns padded to their widest value
    #[default]
    Tabular,
    /// Tab-separated, unpadded
    Tsv,
}

/// Formats query results for display
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a header row and data rows, each line newline-terminated.
    pub fn format_rows(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        match self.format {
            OutputFormat::Tsv => Self::format_tsv(columns, rows),
            OutputFormat::Tabular => Self::format_tabular(columns, rows),
        }
    }

    /// One table name per line
    pub fn format_table_names(&self, tables: &[String]) -> String {
        let mut output = String::new();
        for table in tables {
            output.push_str(table);
            output.push('\n');
        }
        output
    }

    fn format_tsv(columns: &[String], rows: &[Vec<String>]) -> String {
        let mut output = columns.join("\t");
        output.push('\n');
        for row in rows {
            output.push_str(&row.join("\t"));
            output.push('\n');
        }
        output
    }

    fn format_tabular(columns: &[String], rows: &[Vec<String>]) -> String {
        let mut col_widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
        for row in rows {
            for (i, value) in row.iter().enumerate() {
                if let Some(width) = col_widths.get_mut(i) {
                    *width = (*width).max(value.chars().count());
                }
            }
        }

        let mut output = String::new();
        Self::push_padded_line(&mut output, columns, &col_widths);
        for row in rows {
            Self::push_padded_line(&mut output, row, &col_widths);
        }
        output
    }

    fn push_padded_line(output: &mut String, values: &[String], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let width = col_widths.get(i).copied().unwrap_or(0);
            line.push_str(&format!("{:width$}", value, width = width));
        }
        // Padding after the last column is noise
        output.push_str(line.trim_end_matches(' '));
        output.push('\n');
    }

    /// Render one decoded value for display
    pub fn format_value(value: &TypedValue) -> String {
        match value {
            TypedValue::Null => "NULL".to_string(),
            TypedValue::Varchar(s) => s.clone(),
            TypedValue::Boolean(b) => b.to_string(),
            TypedValue::BigInt(n) => n.to_string(),
            TypedValue::Double(d) => Self::format_double(*d),
            TypedValue::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            TypedValue::TimestampWithTimeZone(ts) => format!(
                "{} {}",
                ts.to_rfc3339_opts(SecondsFormat::AutoSi, false),
                ts.timezone().name()
            ),
            TypedValue::Varbinary(bytes) => general_purpose::STANDARD.encode(bytes),
            TypedValue::MapVarchar(map) => {
                // Sorted so output is stable between runs
                let sorted: BTreeMap<&String, &String> = map.iter().collect();
                serde_json::to_string(&sorted).unwrap_or_default()
            }
            TypedValue::ArrayVarchar(items) => serde_json::to_string(items).unwrap_or_default(),
        }
    }

    /// Same spellings the server uses for non-finite doubles
    fn format_double(value: f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else if value == f64::INFINITY {
            "Infinity".to_string()
        } else if value == f64::NEG_INFINITY {
            "-Infinity".to_string()
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use std::collections::HashMap;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_tsv() {
        let formatter = OutputFormatter::new(OutputFormat::Tsv);
        let columns = strings(&["name", "hits"]);
        let rows = vec![strings(&["home", "12"]), strings(&["about", "3"])];

        assert_eq!(formatter.format_rows(&columns, &rows), "name\thits\nhome\t12\nabout\t3\n");
    }

    #[test]
    fn test_format_tabular_pads_to_widest_value() {
        let formatter = OutputFormatter::new(OutputFormat::Tabular);
        let columns = strings(&["name", "hits"]);
        let rows = vec![strings(&["homepage", "12"]), strings(&["a", "12345"])];

        assert_eq!(
            formatter.format_rows(&columns, &rows),
            "name      hits\nhomepage  12\na         12345\n"
        );
    }

    #[test]
    fn test_format_header_only() {
        let formatter = OutputFormatter::new(OutputFormat::Tabular);
        assert_eq!(formatter.format_rows(&strings(&["col0"]), &[]), "col0\n");
    }

    #[test]
    fn test_format_table_names() {
        let formatter = OutputFormatter::new(OutputFormat::Tsv);
        assert_eq!(
            formatter.format_table_names(&strings(&["lineitem", "orders"])),
            "lineitem\norders\n"
        );
    }

    #[test]
    fn test_format_scalar_values() {
        assert_eq!(OutputFormatter::format_value(&TypedValue::Null), "NULL");
        assert_eq!(OutputFormatter::format_value(&TypedValue::from("c0r0")), "c0r0");
        assert_eq!(OutputFormatter::format_value(&TypedValue::Boolean(true)), "true");
        assert_eq!(OutputFormatter::format_value(&TypedValue::BigInt(-7)), "-7");
        assert_eq!(OutputFormatter::format_value(&TypedValue::Double(12.45)), "12.45");
        assert_eq!(OutputFormatter::format_value(&TypedValue::Double(f64::INFINITY)), "Infinity");
        assert_eq!(
            OutputFormatter::format_value(&TypedValue::Double(f64::NEG_INFINITY)),
            "-Infinity"
        );
        assert_eq!(OutputFormatter::format_value(&TypedValue::Double(f64::NAN)), "NaN");
    }

    #[test]
    fn test_format_zoned_timestamp() {
        let wall = NaiveDate::from_ymd_opt(2015, 4, 23)
            .and_then(|d| d.and_hms_milli_opt(10, 0, 8, 123))
            .unwrap();
        let ts = chrono_tz::Europe::London.from_local_datetime(&wall).earliest().unwrap();

        assert_eq!(
            OutputFormatter::format_value(&TypedValue::TimestampWithTimeZone(ts)),
            "2015-04-23T10:00:08.123+01:00 Europe/London"
        );
    }

    #[test]
    fn test_format_structured_values() {
        assert_eq!(OutputFormatter::format_value(&TypedValue::Varbinary(vec![0, 1])), "AAE=");

        let map: HashMap<String, String> =
            [("b".to_string(), "2".to_string()), ("a".to_string(), "1".to_string())]
                .into_iter()
                .collect();
        assert_eq!(
            OutputFormatter::format_value(&TypedValue::MapVarchar(map)),
            r#"{"a":"1","b":"2"}"#
        );

        assert_eq!(
            OutputFormatter::format_value(&TypedValue::ArrayVarchar(strings(&["x", "y"]))),
            r#"["x","y"]"#
        );
    }
}
