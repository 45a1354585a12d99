//! CLI session state management
//!
//! Owns the presto-link client and the output formatter for one `prq`
//! invocation and writes rendered results to the given writer.

use presto_link::{PrestoLinkClient, PrestoLinkTimeouts};
use std::io::Write;
use std::time::Instant;

use crate::error::{CLIError, Result};
use crate::formatter::{OutputFormat, OutputFormatter};

pub struct CLISession {
    client: PrestoLinkClient,
    formatter: OutputFormatter,
}

impl CLISession {
    /// Connect to the coordinator named by `data_source`.
    ///
    /// No request is made here; an unreachable coordinator surfaces on the
    /// first query.
    pub fn new(
        data_source: &str,
        format: OutputFormat,
        timeouts: PrestoLinkTimeouts,
    ) -> Result<Self> {
        let client = PrestoLinkClient::builder()
            .data_source(data_source)
            .timeouts(timeouts)
            .build()?;
        Ok(Self::with_client(client, format))
    }

    pub fn with_client(client: PrestoLinkClient, format: OutputFormat) -> Self {
        Self {
            client,
            formatter: OutputFormatter::new(format),
        }
    }

    pub fn client(&self) -> &PrestoLinkClient {
        &self.client
    }

    /// Run `sql` and write a header line plus one line per row.
    pub async fn execute<W: Write>(&mut self, sql: &str, out: &mut W) -> Result<()> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(CLIError::UsageError("query is empty".into()));
        }

        let start = Instant::now();

        let mut cursor = self.client.query(sql).await?;
        let columns = cursor.column_names().await?;

        let mut rows = Vec::new();
        while let Some(row) = cursor.next_row().await? {
            rows.push(row.iter().map(OutputFormatter::format_value).collect::<Vec<_>>());
        }

        log::debug!(
            "[CLI] Query {} returned {} rows in {} pages ({} ms)",
            cursor.query_id().unwrap_or("<unknown>"),
            rows.len(),
            cursor.fetch_count(),
            start.elapsed().as_millis()
        );

        out.write_all(self.formatter.format_rows(&columns, &rows).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// List the tables of the data source's catalog and schema.
    pub async fn show_tables<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let tables = self.client.show_tables().await?;
        out.write_all(self.formatter.format_table_names(&tables).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_data_source() {
        let timeouts = PrestoLinkTimeouts::fast();
        let result = CLISession::new("http://localhost:8080/", OutputFormat::Tsv, timeouts);
        assert!(matches!(result, Err(CLIError::LinkError(_))));
    }

    #[test]
    fn test_new_uses_data_source_context() {
        let session = CLISession::new(
            "presto://alice@coordinator:9000/tpch/tiny",
            OutputFormat::Tabular,
            PrestoLinkTimeouts::fast(),
        )
        .unwrap();

        let ctx = session.client().context();
        assert_eq!(ctx.endpoint(), "coordinator:9000");
        assert_eq!(ctx.catalog(), "tpch");
        assert_eq!(ctx.schema(), "tiny");
        assert_eq!(ctx.user(), "alice");
        assert_eq!(session.client().timeouts(), &PrestoLinkTimeouts::fast());
    }

    #[tokio::test]
    async fn test_execute_rejects_blank_query() {
        let timeouts = PrestoLinkTimeouts::fast();
        let mut session =
            CLISession::new("presto://localhost/", OutputFormat::Tsv, timeouts).unwrap();
        let mut out = Vec::new();

        let err = session.execute("  \n", &mut out).await.unwrap_err();
        assert!(matches!(err, CLIError::UsageError(_)));
        assert!(out.is_empty());
    }
}
