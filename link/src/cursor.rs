//! Result pagination.
//!
//! A [`ResultCursor`] walks the chain of pages a query produces, fetching the
//! next page only when the caller has consumed the buffered one, and decodes
//! each row through the converters bound from the query's column schema.
//!
//! ```text
//! Unfetched ──fetch──► HasRows ──fetch──► HasRows ... ──► Exhausted
//!     │                   │
//!     └───────────────────┴──────────────────────────────► Failed
//! ```
//!
//! `Exhausted` and `Failed` are terminal: no request is made once either is
//! reached, and a failed cursor returns its failure from every later call.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::time::Instant;

use crate::{
    convert::ValueConverter,
    error::{PrestoLinkError, QueryFailure, Result},
    models::{Column, QueryResponse, TypedValue},
    query::read_query_response,
};

/// Position of a cursor in the pagination state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No page requested yet
    Unfetched,
    /// At least one page fetched; rows are buffered or a continuation is pending
    HasRows,
    /// Every page consumed; end-of-data
    Exhausted,
    /// A terminal failure was observed
    Failed,
}

impl CursorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CursorState::Exhausted | CursorState::Failed)
    }
}

/// Pull-based reader over the pages of one query.
///
/// Single-owner: every operation takes `&mut self` and the cursor does no
/// internal synchronization. Independent cursors can be driven from
/// independent tasks.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> presto_link::Result<()> {
/// let client = presto_link::PrestoLinkClient::builder()
///     .data_source("presto://alice@coordinator:8080/hive/default")
///     .build()?;
///
/// let mut cursor = client.query("SELECT name, price FROM products").await?;
/// println!("{:?}", cursor.column_names().await?);
/// while let Some(row) = cursor.next_row().await? {
///     println!("{:?}", row);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ResultCursor {
    http_client: reqwest::Client,
    query_id: Option<String>,
    next_uri: Option<String>,
    state: CursorState,
    schema_bound: bool,
    columns: Vec<Column>,
    converters: Vec<ValueConverter>,
    page_rows: Vec<Vec<JsonValue>>,
    row_index: usize,
    failure: Option<PrestoLinkError>,
    fetch_count: usize,
}

impl ResultCursor {
    /// Create a cursor seeded with the first continuation handle.
    ///
    /// `None` means the query produced no pages; the cursor starts exhausted.
    pub fn new(http_client: reqwest::Client, next_uri: Option<String>) -> Self {
        let state = if next_uri.is_some() {
            CursorState::Unfetched
        } else {
            CursorState::Exhausted
        };
        Self {
            http_client,
            query_id: None,
            next_uri,
            state,
            schema_bound: false,
            columns: Vec::new(),
            converters: Vec::new(),
            page_rows: Vec::new(),
            row_index: 0,
            failure: None,
            fetch_count: 0,
        }
    }

    pub(crate) fn with_query_id(mut self, query_id: impl Into<String>) -> Self {
        self.query_id = Some(query_id.into());
        self
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// Server-assigned id of the query, when known
    pub fn query_id(&self) -> Option<&str> {
        self.query_id.as_deref()
    }

    /// Continuation handle the next fetch will request
    pub fn next_uri(&self) -> Option<&str> {
        self.next_uri.as_deref()
    }

    /// Number of page requests issued so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    /// The query's column schema.
    ///
    /// Fetches pages until the schema is known; makes no request once it is.
    /// A query that finishes without ever declaring columns has none.
    pub async fn columns(&mut self) -> Result<&[Column]> {
        self.check_failed()?;
        while !self.schema_bound && self.next_uri.is_some() {
            self.fetch().await?;
        }
        Ok(&self.columns)
    }

    /// Column names in schema order
    pub async fn column_names(&mut self) -> Result<Vec<String>> {
        let columns = self.columns().await?;
        Ok(columns.iter().map(|c| c.name.clone()).collect())
    }

    /// Decode the next row.
    ///
    /// `Ok(None)` is end-of-data. A conversion failure aborts only the current
    /// row: the cursor moves past it and stays usable.
    pub async fn next_row(&mut self) -> Result<Option<Vec<TypedValue>>> {
        if !self.fill_buffer().await? {
            return Ok(None);
        }
        let mut row = vec![TypedValue::Null; self.converters.len()];
        self.decode_current_row(&mut row)?;
        Ok(Some(row))
    }

    /// Decode the next row into a caller-provided slice.
    ///
    /// Returns `Ok(false)` at end-of-data. `dest` must have one slot per
    /// column. When a value fails to convert, slots for earlier columns of the
    /// row may already have been overwritten.
    pub async fn next_into(&mut self, dest: &mut [TypedValue]) -> Result<bool> {
        if !self.fill_buffer().await? {
            return Ok(false);
        }
        if dest.len() != self.converters.len() {
            return Err(PrestoLinkError::ColumnCountMismatch {
                expected: self.converters.len(),
                actual: dest.len(),
            });
        }
        self.decode_current_row(dest)?;
        Ok(true)
    }

    /// Drain the remaining rows.
    pub async fn collect_rows(&mut self) -> Result<Vec<Vec<TypedValue>>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Make sure a row is buffered at `row_index`, fetching as needed.
    ///
    /// Returns `false` at end-of-data. Pages without rows that still carry a
    /// continuation are fetched through without surfacing to the caller.
    async fn fill_buffer(&mut self) -> Result<bool> {
        self.check_failed()?;
        while self.row_index >= self.page_rows.len() {
            if self.next_uri.is_none() {
                self.state = CursorState::Exhausted;
                return Ok(false);
            }
            self.fetch().await?;
        }
        Ok(true)
    }

    fn decode_current_row(&mut self, dest: &mut [TypedValue]) -> Result<()> {
        let row = &self.page_rows[self.row_index];
        // Advance first so a bad value does not pin the cursor to this row
        self.row_index += 1;

        for ((slot, converter), raw) in dest.iter_mut().zip(&self.converters).zip(row) {
            *slot = converter.convert(raw)?;
        }
        Ok(())
    }

    /// One page round trip and the state transition it causes.
    async fn fetch(&mut self) -> Result<()> {
        let Some(uri) = self.next_uri.take() else {
            self.state = CursorState::Exhausted;
            return Ok(());
        };

        let page = match self.fetch_page(&uri).await {
            Ok(page) => page,
            Err(e) => return Err(self.fail(e)),
        };
        if self.query_id.is_none() && !page.id.is_empty() {
            self.query_id = Some(page.id.clone());
        }
        self.apply_page(page)
    }

    async fn fetch_page(&mut self, uri: &str) -> Result<QueryResponse> {
        self.fetch_count += 1;
        let start = Instant::now();
        debug!("[PRESTO_CURSOR] GET {} (fetch #{})", uri, self.fetch_count);

        let response = self.http_client.get(uri).send().await?;
        let page = read_query_response(response).await?;
        debug!(
            "[PRESTO_CURSOR] Page received: state={} rows={} last_page={} duration_ms={}",
            page.state(),
            page.row_count(),
            page.is_last_page(),
            start.elapsed().as_millis()
        );
        Ok(page)
    }

    fn apply_page(&mut self, mut page: QueryResponse) -> Result<()> {
        if let Some(detail) = page.failure_detail() {
            return Err(self.fail(PrestoLinkError::QueryFailed(QueryFailure::Server(detail))));
        }

        self.row_index = 0;
        self.page_rows = page.take_rows();
        self.next_uri = page.next_uri.take();

        if !self.schema_bound {
            if let Some(columns) = page.columns.take() {
                if let Err(e) = self.bind_schema(columns) {
                    return Err(self.fail(e));
                }
            }
        }

        // Rows before any schema count as ragged against zero columns
        let expected = self.converters.len();
        let ragged = self.page_rows.iter().map(Vec::len).find(|len| *len != expected);
        if let Some(actual) = ragged {
            return Err(self.fail(PrestoLinkError::ColumnCountMismatch { expected, actual }));
        }

        self.state = if self.page_rows.is_empty() && self.next_uri.is_none() {
            CursorState::Exhausted
        } else {
            CursorState::HasRows
        };
        Ok(())
    }

    /// Bind one converter per column. Happens once per query.
    fn bind_schema(&mut self, columns: Vec<Column>) -> Result<()> {
        let converters = columns
            .iter()
            .map(|c| c.column_type().map(|t| t.converter()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "[PRESTO_CURSOR] Schema bound: {}",
            columns
                .iter()
                .map(|c| format!("{} {}", c.name, c.type_name))
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.columns = columns;
        self.converters = converters;
        self.schema_bound = true;
        Ok(())
    }

    /// Record a terminal failure and hand it back for returning.
    fn fail(&mut self, err: PrestoLinkError) -> PrestoLinkError {
        warn!(
            "[PRESTO_CURSOR] Query {} failed: {}",
            self.query_id.as_deref().unwrap_or("<unknown>"),
            err
        );
        self.state = CursorState::Failed;
        self.next_uri = None;
        self.page_rows.clear();
        self.row_index = 0;
        self.failure = Some(err.clone());
        err
    }

    fn check_failed(&self) -> Result<()> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ResultCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCursor")
            .field("query_id", &self.query_id)
            .field("state", &self.state)
            .field("next_uri", &self.next_uri)
            .field("columns", &self.columns.len())
            .field("buffered_rows", &self.page_rows.len().saturating_sub(self.row_index))
            .field("fetch_count", &self.fetch_count)
            .finish()
    }
}
