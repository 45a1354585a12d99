//! Statement submission over HTTP.

use crate::{
    error::{PrestoLinkError, QueryFailure, Result},
    models::{ConnectionContext, QueryResponse},
};
use log::{debug, warn};
use std::time::Instant;

/// Header carrying the user identity
pub const PRESTO_USER_HEADER: &str = "X-Presto-User";
/// Header carrying the default catalog for unqualified names
pub const PRESTO_CATALOG_HEADER: &str = "X-Presto-Catalog";
/// Header carrying the default schema for unqualified names
pub const PRESTO_SCHEMA_HEADER: &str = "X-Presto-Schema";

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedQuery {
    /// Server-assigned query identifier
    pub id: String,
    pub info_uri: Option<String>,
    /// First continuation handle; `None` when the query produced no pages
    pub next_uri: Option<String>,
}

/// Submits statements to the coordinator.
#[derive(Clone)]
pub struct QuerySubmitter {
    context: ConnectionContext,
    http_client: reqwest::Client,
}

impl QuerySubmitter {
    pub fn new(context: ConnectionContext, http_client: reqwest::Client) -> Self {
        Self {
            context,
            http_client,
        }
    }

    pub fn context(&self) -> &ConnectionContext {
        &self.context
    }

    /// POST the statement text and return the first continuation handle.
    ///
    /// A non-success status is a `QueryFailed` whatever the body says; a
    /// `FAILED` state in a success response carries the server's error detail.
    pub async fn submit(&self, sql: &str) -> Result<SubmittedQuery> {
        let sql_preview = if sql.len() > 80 {
            let mut end = 80;
            while !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end])
        } else {
            sql.to_string()
        };
        debug!(
            "[PRESTO_QUERY] Submitting query: \"{}\" (len={})",
            sql_preview.replace('\n', " "),
            sql.len()
        );

        let url = self.context.statement_url();
        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header(PRESTO_USER_HEADER, self.context.user())
            .header(PRESTO_CATALOG_HEADER, self.context.catalog())
            .header(PRESTO_SCHEMA_HEADER, self.context.schema())
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(sql.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!("[PRESTO_HTTP] POST {} failed: {}", url, e);
                PrestoLinkError::from(e)
            })?;

        let query_response = read_query_response(response).await?;
        debug!(
            "[PRESTO_QUERY] Submitted: id={} state={} next_uri={:?} duration_ms={}",
            query_response.id,
            query_response.state(),
            query_response.next_uri,
            start.elapsed().as_millis()
        );

        if let Some(detail) = query_response.failure_detail() {
            warn!("[PRESTO_QUERY] Query {} failed: {}", query_response.id, detail);
            return Err(PrestoLinkError::QueryFailed(QueryFailure::Server(detail)));
        }

        Ok(SubmittedQuery {
            id: query_response.id,
            info_uri: query_response.info_uri,
            next_uri: query_response.next_uri,
        })
    }
}

/// Check the status of a statement-protocol response and decode its envelope.
///
/// Does not inspect `stats.state`; callers decide what a `FAILED` page means.
pub(crate) async fn read_query_response(response: reqwest::Response) -> Result<QueryResponse> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("[PRESTO_HTTP] {} returned status={} body=\"{}\"", url, status, body.trim());
        return Err(PrestoLinkError::QueryFailed(QueryFailure::HttpStatus {
            status_code: status.as_u16(),
            body: body.trim().to_string(),
        }));
    }

    let body = response.bytes().await?;
    let query_response: QueryResponse = serde_json::from_slice(&body)?;
    debug!(
        "[PRESTO_HTTP] {} status={} rows={} bytes={}",
        url,
        status,
        query_response.row_count(),
        body.len()
    );
    Ok(query_response)
}
