//! Data models for presto-link.
//!
//! Defines the statement-protocol response envelope, the column schema and
//! the typed values rows are decoded into.

pub mod column;
pub mod column_type;
pub mod connection_context;
pub mod error_detail;
pub mod query_response;
pub mod query_stats;
pub mod typed_value;


pub use column::Column;
pub use column_type::ColumnType;
pub use connection_context::{
    ConnectionContext, DEFAULT_CATALOG, DEFAULT_PORT, DEFAULT_SCHEMA, DEFAULT_USER,
};
pub use error_detail::{ErrorDetail, ErrorLocation};
pub use query_response::QueryResponse;
pub use query_stats::{QueryState, QueryStats};
pub use typed_value::TypedValue;
