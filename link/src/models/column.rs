use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::column_type::ColumnType;
use crate::error::Result;

/// A result column as declared by the server on the first page of a query.
///
/// # Example (JSON representation)
///
/// ```json
/// {
///   "name": "col0",
///   "type": "varchar",
///   "typeSignature": { "rawType": "varchar", "typeArguments": [], "literalArguments": [] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name
    pub name: String,

    /// Declared type name, exactly as sent by the server
    #[serde(rename = "type")]
    pub type_name: String,

    /// Structured form of the type; not interpreted by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_signature: Option<JsonValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            type_signature: None,
        }
    }

    /// Resolve the declared type name.
    ///
    /// Fails with `UnsupportedType` when the name is not in the type table.
    pub fn column_type(&self) -> Result<ColumnType> {
        self.type_name.parse()
    }
}
