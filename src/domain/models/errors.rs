use std::time::Duration;

use thiserror::Error;

use super::RunStatus;

/// Failures while opening a session. These abort startup and are reported as
/// configuration problems rather than turn failures.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("{0} is not set")]
    MissingConfig(String),

    #[error("unable to resolve assistant {assistant_id}: {cause}")]
    Assistant {
        assistant_id: String,
        cause: anyhow::Error,
    },

    #[error("unable to create a conversation thread: {0}")]
    Thread(anyhow::Error),
}

/// Failures raised inside a single turn. They never escape the turn.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("assistant run failed: {status}{}", .reason.as_ref().map(|r| format!(" ({r})")).unwrap_or_default())]
    RunFailed {
        status: RunStatus,
        reason: Option<String>,
    },

    #[error("assistant run did not finish within {}ms", .waited.as_millis())]
    Timeout { waited: Duration },

    #[error("the assistant did not post a reply")]
    NoReply,
}
