use serde::{Deserialize, Serialize};

/// Lifecycle state of a query as reported in `stats.state`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryState {
    Queued,
    Planning,
    Starting,
    /// Assumed when a response carries no `stats` block.
    #[default]
    Running,
    Finishing,
    Finished,
    Failed,
    /// Any state name this client does not know about
    #[serde(other)]
    Unknown,
}

impl QueryState {
    /// True for `FINISHED` and `FAILED`.
    pub fn is_done(&self) -> bool {
        matches!(self, QueryState::Finished | QueryState::Failed)
    }
}

impl std::fmt::Display for QueryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QueryState::Queued => "QUEUED",
            QueryState::Planning => "PLANNING",
            QueryState::Starting => "STARTING",
            QueryState::Running => "RUNNING",
            QueryState::Finishing => "FINISHING",
            QueryState::Finished => "FINISHED",
            QueryState::Failed => "FAILED",
            QueryState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// Execution statistics block of a response page.
///
/// Only `state` drives client behavior; the counters are informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryStats {
    pub state: QueryState,
    pub scheduled: bool,
    pub nodes: u64,
    pub total_splits: u64,
    pub queued_splits: u64,
    pub running_splits: u64,
    pub completed_splits: u64,
    pub cpu_time_millis: u64,
    pub wall_time_millis: u64,
    pub processed_rows: u64,
    pub processed_bytes: u64,
}
