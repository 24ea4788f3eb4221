#[cfg(test)]
#[path = "session_client_test.rs"]
mod tests;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Assistant;
use crate::domain::models::AssistantsHandle;
use crate::domain::models::StartupError;
use crate::domain::models::Thread;
use crate::infrastructure::assistants::AssistantsManager;

/// A live handle to the service, bound to one resolved assistant and one
/// conversation thread for the lifetime of the session.
pub struct SessionClient {
    api: AssistantsHandle,
    assistant: Assistant,
    thread: Thread,
}

impl SessionClient {
    /// Opens a session from the loaded configuration.
    pub async fn from_config() -> Result<SessionClient, StartupError> {
        if Config::get(ConfigKey::OpenAiToken).is_empty() {
            return Err(StartupError::MissingConfig(format!(
                "{} (OPENAI_API_KEY)",
                ConfigKey::OpenAiToken
            )));
        }

        return SessionClient::connect(
            AssistantsManager::get(),
            &Config::get(ConfigKey::AssistantID),
        )
        .await;
    }

    pub async fn connect(
        api: AssistantsHandle,
        assistant_id: &str,
    ) -> Result<SessionClient, StartupError> {
        if assistant_id.trim().is_empty() {
            return Err(StartupError::MissingConfig(format!(
                "{} (OPENAI_ASSISTANT_ID)",
                ConfigKey::AssistantID
            )));
        }

        let assistant = api
            .retrieve_assistant(assistant_id)
            .await
            .map_err(|cause| {
                return StartupError::Assistant {
                    assistant_id: assistant_id.to_string(),
                    cause,
                };
            })?;

        let thread = api.create_thread().await.map_err(StartupError::Thread)?;

        tracing::info!(
            assistant_id = %assistant.id,
            thread_id = %thread.id,
            "Session opened"
        );

        return Ok(SessionClient {
            api,
            assistant,
            thread,
        });
    }

    pub fn api(&self) -> AssistantsHandle {
        return self.api.clone();
    }

    pub fn assistant(&self) -> &Assistant {
        return &self.assistant;
    }

    /// Name shown on assistant bubbles, falling back to the id.
    pub fn assistant_name(&self) -> String {
        return self
            .assistant
            .name
            .clone()
            .filter(|name| return !name.is_empty())
            .unwrap_or_else(|| return self.assistant.id.to_string());
    }

    pub fn thread(&self) -> &Thread {
        return &self.thread;
    }
}
