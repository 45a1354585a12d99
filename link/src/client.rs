//! Main presto-link client with builder pattern.
//!
//! The builder is the only way to obtain a client: there is no global driver
//! registry, a connection is whatever [`PrestoLinkClientBuilder::build`] returns.

use crate::{
    cursor::ResultCursor,
    data_source::parse_data_source,
    error::{PrestoLinkError, Result},
    models::{ConnectionContext, TypedValue},
    query::QuerySubmitter,
    timeouts::PrestoLinkTimeouts,
};
use std::time::Duration;

/// Main presto-link client.
///
/// Cheap to clone; clones share the HTTP connection pool and the immutable
/// [`ConnectionContext`].
///
/// # Examples
///
/// ```rust,no_run
/// use presto_link::PrestoLinkClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PrestoLinkClient::builder()
///     .data_source("presto://alice@coordinator:8080/hive/web")
///     .timeout(std::time::Duration::from_secs(120))
///     .build()?;
///
/// let mut cursor = client.query("SELECT url, hits FROM page_views").await?;
/// while let Some(row) = cursor.next_row().await? {
///     println!("{:?}", row);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PrestoLinkClient {
    context: ConnectionContext,
    http_client: reqwest::Client,
    submitter: QuerySubmitter,
    timeouts: PrestoLinkTimeouts,
}

impl PrestoLinkClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> PrestoLinkClientBuilder {
        PrestoLinkClientBuilder::new()
    }

    /// Submit a statement and return a cursor over its results.
    ///
    /// Only the submission round trip happens here; pages are fetched as the
    /// cursor is read.
    pub async fn query(&self, sql: &str) -> Result<ResultCursor> {
        let submitted = self.submitter.submit(sql).await?;
        let cursor = ResultCursor::new(self.http_client.clone(), submitted.next_uri);
        Ok(cursor.with_query_id(submitted.id))
    }

    /// Names of the tables in the context's catalog and schema
    pub async fn show_tables(&self) -> Result<Vec<String>> {
        let mut cursor = self.query("SHOW TABLES").await?;
        let mut tables = Vec::new();
        while let Some(row) = cursor.next_row().await? {
            match row.into_iter().next() {
                Some(TypedValue::Varchar(name)) => tables.push(name),
                Some(TypedValue::Null) | None => {},
                Some(other) => {
                    return Err(PrestoLinkError::SerializationError(format!(
                        "unexpected table name value {:?}",
                        other
                    )))
                }
            }
        }
        Ok(tables)
    }

    pub fn context(&self) -> &ConnectionContext {
        &self.context
    }

    /// Get the configured timeouts
    pub fn timeouts(&self) -> &PrestoLinkTimeouts {
        &self.timeouts
    }
}

/// Builder for configuring [`PrestoLinkClient`] instances.
pub struct PrestoLinkClientBuilder {
    data_source: Option<String>,
    context: Option<ConnectionContext>,
    http_client: Option<reqwest::Client>,
    timeouts: PrestoLinkTimeouts,
}

impl PrestoLinkClientBuilder {
    fn new() -> Self {
        Self {
            data_source: None,
            context: None,
            http_client: None,
            timeouts: PrestoLinkTimeouts::default(),
        }
    }

    /// Set the data source, e.g. `presto://alice@coordinator:8080/hive/default`
    pub fn data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = Some(data_source.into());
        self
    }

    /// Use an already-built connection context. Takes precedence over
    /// [`data_source`](Self::data_source).
    pub fn context(mut self, context: ConnectionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Use a caller-configured HTTP client (TLS, proxies, custom timeouts).
    ///
    /// The builder's timeouts are not applied to a supplied client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the whole-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Set comprehensive timeout configuration
    pub fn timeouts(mut self, timeouts: PrestoLinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PrestoLinkClient> {
        let context = match (self.context, self.data_source) {
            (Some(context), _) => context,
            (None, Some(data_source)) => parse_data_source(&data_source)
                .map_err(|e| PrestoLinkError::ConfigurationError(e.to_string()))?,
            (None, None) => {
                return Err(PrestoLinkError::ConfigurationError(
                    "a data source or connection context is required".into(),
                ))
            }
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut client_builder = reqwest::Client::builder()
                    .connect_timeout(self.timeouts.connection_timeout)
                    .user_agent(concat!("presto-link/", env!("CARGO_PKG_VERSION")));
                if !PrestoLinkTimeouts::is_no_timeout(self.timeouts.request_timeout) {
                    client_builder = client_builder.timeout(self.timeouts.request_timeout);
                }
                client_builder
                    .build()
                    .map_err(|e| PrestoLinkError::ConfigurationError(e.to_string()))?
            }
        };

        log::debug!(
            "[PRESTO_CLIENT] Built client for {} (connect_timeout={:?}, request_timeout={:?})",
            context,
            self.timeouts.connection_timeout,
            self.timeouts.request_timeout
        );

        Ok(PrestoLinkClient {
            submitter: QuerySubmitter::new(context.clone(), http_client.clone()),
            context,
            http_client,
            timeouts: self.timeouts,
        })
    }
}
