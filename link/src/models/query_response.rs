use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::column::Column;
use super::error_detail::ErrorDetail;
use super::query_stats::{QueryState, QueryStats};

/// One decoded response from the statement protocol.
///
/// The submission response and every page fetched through `nextUri` share this
/// envelope. `columns` is normally present only on the first page carrying
/// data; `nextUri` is absent on the last page.
///
/// # Example (JSON representation)
///
/// ```json
/// {
///   "id": "20150423_100008_00001_abcde",
///   "infoUri": "http://coordinator:8080/v1/query/20150423_100008_00001_abcde",
///   "nextUri": "http://coordinator:8080/v1/statement/20150423_100008_00001_abcde/2",
///   "columns": [{ "name": "col0", "type": "varchar", "typeSignature": { "rawType": "varchar" } }],
///   "data": [["c0r0"], ["c0r1"]],
///   "stats": { "state": "RUNNING" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Server-assigned query identifier
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_uri: Option<String>,

    /// Continuation handle; absent once no further pages will be produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_cancel_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,

    /// Raw rows, one inner array per row, ordered like `columns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Vec<JsonValue>>>,

    #[serde(default)]
    pub stats: QueryStats,

    /// Present when `stats.state` is `FAILED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl QueryResponse {
    pub fn state(&self) -> QueryState {
        self.stats.state
    }

    pub fn is_failed(&self) -> bool {
        self.stats.state == QueryState::Failed
    }

    /// True when the response carries no continuation handle.
    pub fn is_last_page(&self) -> bool {
        self.next_uri.is_none()
    }

    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    /// Failure detail for a `FAILED` response.
    ///
    /// The server does not always attach an `error` block, in which case an
    /// empty detail is returned.
    pub fn failure_detail(&self) -> Option<ErrorDetail> {
        if !self.is_failed() {
            return None;
        }
        Some(self.error.clone().unwrap_or_default())
    }

    /// Take ownership of the row data, leaving `None` behind.
    pub fn take_rows(&mut self) -> Vec<Vec<JsonValue>> {
        self.data.take().unwrap_or_default()
    }
}
