use std::str::FromStr;

use crate::data_source::parse_data_source;
use crate::error::PrestoLinkError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CATALOG: &str = "hive";
pub const DEFAULT_SCHEMA: &str = "default";
pub const DEFAULT_USER: &str = "presto-link";

/// Addressing and identity information threaded into every request.
///
/// Immutable once built. Clone it freely: every statement issued from a
/// client carries its own copy.
///
/// # Examples
///
/// ```rust
/// use presto_link::ConnectionContext;
///
/// let ctx = ConnectionContext::new("coordinator:8080", "hive", "web", "alice");
/// assert_eq!(ctx.statement_url(), "http://coordinator:8080/v1/statement");
///
/// let parsed: ConnectionContext = "presto://alice@coordinator/hive/web".parse().unwrap();
/// assert_eq!(parsed, ctx);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionContext {
    endpoint: String,
    catalog: String,
    schema: String,
    user: String,
}

impl ConnectionContext {
    pub fn new(
        endpoint: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            catalog: catalog.into(),
            schema: schema.into(),
            user: user.into(),
        }
    }

    /// Coordinator address as `host:port`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// URL that statements are POSTed to
    pub fn statement_url(&self) -> String {
        format!("http://{}/v1/statement", self.endpoint)
    }
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self::new(
            format!("localhost:{}", DEFAULT_PORT),
            DEFAULT_CATALOG,
            DEFAULT_SCHEMA,
            DEFAULT_USER,
        )
    }
}

impl FromStr for ConnectionContext {
    type Err = PrestoLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_data_source(s)
    }
}

impl std::fmt::Display for ConnectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "presto://{}@{}/{}/{}",
            self.user, self.endpoint, self.catalog, self.schema
        )
    }
}
