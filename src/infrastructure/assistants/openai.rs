#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Assistant;
use crate::domain::models::AssistantsApi;
use crate::domain::models::Author;
use crate::domain::models::Run;
use crate::domain::models::Thread;
use crate::domain::models::ThreadMessage;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RunRequest {
    assistant_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

pub struct OpenAI {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            url: Config::get(ConfigKey::OpenAiURL),
            token: Config::get(ConfigKey::OpenAiToken),
            client: reqwest::Client::new(),
        };
    }
}

impl OpenAI {
    fn endpoint(&self, path: &str) -> String {
        return format!(
            "{url}/v1/{path}",
            url = self.url.trim_end_matches('/'),
            path = path
        );
    }

    #[allow(clippy::implicit_return)]
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, action: &str) -> Result<T> {
        let res = req
            .header("Authorization", format!("Bearer {}", self.token))
            .header("OpenAI-Beta", "assistants=v2")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|err| return err.error.message)
                .unwrap_or(body);

            tracing::error!(
                status = status.as_u16(),
                detail = %detail,
                "Failed to {} on OpenAI",
                action
            );
            bail!("Failed to {action} on OpenAI ({status}): {detail}");
        }

        let body = res.json::<T>().await?;
        return Ok(body);
    }
}

#[async_trait]
impl AssistantsApi for OpenAI {
    #[allow(clippy::implicit_return)]
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        let req = self
            .client
            .get(self.endpoint(&format!("assistants/{assistant_id}")));

        let assistant = self.send::<Assistant>(req, "retrieve assistant").await?;
        tracing::debug!(
            assistant_id = %assistant.id,
            model = %assistant.model,
            "Resolved assistant"
        );

        return Ok(assistant);
    }

    #[allow(clippy::implicit_return)]
    async fn create_thread(&self) -> Result<Thread> {
        let req = self
            .client
            .post(self.endpoint("threads"))
            .json(&serde_json::json!({}));

        let thread = self.send::<Thread>(req, "create thread").await?;
        tracing::debug!(thread_id = %thread.id, "Created thread");

        return Ok(thread);
    }

    #[allow(clippy::implicit_return)]
    async fn create_message(
        &self,
        thread_id: &str,
        author: Author,
        text: &str,
    ) -> Result<ThreadMessage> {
        let req = self
            .client
            .post(self.endpoint(&format!("threads/{thread_id}/messages")))
            .json(&MessageRequest {
                role: author.role().to_string(),
                content: text.to_string(),
            });

        return self.send::<ThreadMessage>(req, "create message").await;
    }

    #[allow(clippy::implicit_return)]
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let req = self
            .client
            .post(self.endpoint(&format!("threads/{thread_id}/runs")))
            .json(&RunRequest {
                assistant_id: assistant_id.to_string(),
            });

        return self.send::<Run>(req, "create run").await;
    }

    #[allow(clippy::implicit_return)]
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let req = self
            .client
            .get(self.endpoint(&format!("threads/{thread_id}/runs/{run_id}")));

        return self.send::<Run>(req, "retrieve run").await;
    }

    #[allow(clippy::implicit_return)]
    async fn list_messages(&self, thread_id: &str, after_id: &str) -> Result<Vec<ThreadMessage>> {
        let req = self
            .client
            .get(self.endpoint(&format!("threads/{thread_id}/messages")))
            .query(&[("order", "asc"), ("after", after_id)]);

        let res = self
            .send::<ListResponse<ThreadMessage>>(req, "list messages")
            .await?;
        tracing::debug!(
            count = res.data.len(),
            has_more = res.has_more,
            "Listed messages"
        );

        return Ok(res.data);
    }
}
