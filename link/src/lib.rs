//! # presto-link: Presto Statement Protocol Client
//!
//! An async client for the HTTP statement protocol spoken by Presto
//! coordinators: submit SQL, then walk the paginated results one typed row at
//! a time.
//!
//! ## Features
//!
//! - **Query submission** over `POST /v1/statement` with identity headers
//! - **Lazy pagination** that follows `nextUri` only when rows are needed
//! - **Typed rows** decoded per column type (varchar, boolean, bigint, double,
//!   timestamp, timestamp with time zone, varbinary, map and array of varchar)
//! - **Server failures** surfaced with the coordinator's error detail
//!
//! ## Example
//!
//! ```rust,no_run
//! use presto_link::{PrestoLinkClient, TypedValue};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PrestoLinkClient::builder()
//!     .data_source("presto://alice@localhost:8080/hive/default")
//!     .build()?;
//!
//! let mut cursor = client.query("SELECT name, age FROM users").await?;
//! println!("columns: {:?}", cursor.column_names().await?);
//!
//! while let Some(row) = cursor.next_row().await? {
//!     if let TypedValue::Varchar(name) = &row[0] {
//!         println!("{}", name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod convert;
pub mod cursor;
pub mod data_source;
pub mod error;
pub mod models;
pub mod query;
pub mod timeouts;

pub use client::{PrestoLinkClient, PrestoLinkClientBuilder};
pub use convert::{ConversionError, ValueConverter};
pub use cursor::{CursorState, ResultCursor};
pub use data_source::{parse_data_source, DATA_SOURCE_SCHEME};
pub use error::{PrestoLinkError, QueryFailure, Result};
pub use models::{
    Column, ColumnType, ConnectionContext, ErrorDetail, ErrorLocation, QueryResponse, QueryState,
    QueryStats, TypedValue, DEFAULT_CATALOG, DEFAULT_PORT, DEFAULT_SCHEMA, DEFAULT_USER,
};
pub use query::{
    QuerySubmitter, SubmittedQuery, PRESTO_CATALOG_HEADER, PRESTO_SCHEMA_HEADER,
    PRESTO_USER_HEADER,
};
pub use timeouts::{PrestoLinkTimeouts, PrestoLinkTimeoutsBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
