use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::Assistant;
use super::Author;
use super::Run;
use super::Thread;
use super::ThreadMessage;

/// The slice of a hosted assistants service that a chat session consumes.
/// Identifiers are opaque and owned by the service.
#[async_trait]
pub trait AssistantsApi {
    /// Used at startup to resolve the configured assistant, verifying the
    /// credential along the way.
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    /// Opens a new, empty conversation thread.
    async fn create_thread(&self) -> Result<Thread>;

    /// Appends a message to a thread. The returned message id marks where
    /// the replies for this turn start.
    async fn create_message(
        &self,
        thread_id: &str,
        author: Author,
        text: &str,
    ) -> Result<ThreadMessage>;

    /// Asks the assistant to process the thread in its current state.
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// Lists messages posted after `after_id`, oldest first.
    async fn list_messages(&self, thread_id: &str, after_id: &str) -> Result<Vec<ThreadMessage>>;
}

/// Shared handle to the service, read-only once the session is open.
pub type AssistantsHandle = Arc<dyn AssistantsApi + Send + Sync>;
