use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Assistant;
use crate::domain::models::AssistantsApi;
use crate::domain::models::Author;
use crate::domain::models::ContentBlock;
use crate::domain::models::MessageContent;
use crate::domain::models::Run;
use crate::domain::models::RunStatus;
use crate::domain::models::TextValue;
use crate::domain::models::Thread;
use crate::domain::models::ThreadMessage;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Calls {
    pub retrieve_assistant: usize,
    pub create_thread: usize,
    pub create_message: usize,
    pub create_run: usize,
    pub retrieve_run: usize,
    pub list_messages: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        return self.retrieve_assistant
            + self.create_thread
            + self.create_message
            + self.create_run
            + self.retrieve_run
            + self.list_messages;
    }
}

/// In-memory service that replays scripted run statuses and replies, and
/// counts every call made against it.
pub struct FakeAssistants {
    pub calls: Mutex<Calls>,
    pub statuses: Mutex<VecDeque<RunStatus>>,
    pub replies: Mutex<Vec<ThreadMessage>>,
    pub sent: Mutex<Vec<String>>,
    pub listed_after: Mutex<Vec<String>>,
    pub fail_on_message: bool,
    pub known_assistant: String,
}

impl Default for FakeAssistants {
    fn default() -> FakeAssistants {
        return FakeAssistants {
            calls: Mutex::new(Calls::default()),
            statuses: Mutex::new(VecDeque::new()),
            replies: Mutex::new(vec![]),
            sent: Mutex::new(vec![]),
            listed_after: Mutex::new(vec![]),
            fail_on_message: false,
            known_assistant: "asst_abc".to_string(),
        };
    }
}

pub fn text_reply(id: &str, text: &str) -> ThreadMessage {
    return ThreadMessage {
        id: id.to_string(),
        role: "assistant".to_string(),
        content: MessageContent::Blocks(vec![ContentBlock::Text {
            text: Some(TextValue {
                value: text.to_string(),
            }),
        }]),
    };
}

impl FakeAssistants {
    pub fn with_script(statuses: Vec<RunStatus>, replies: Vec<ThreadMessage>) -> FakeAssistants {
        let fake = FakeAssistants::default();
        *fake.statuses.lock().unwrap() = VecDeque::from(statuses);
        *fake.replies.lock().unwrap() = replies;
        return fake;
    }

    pub fn calls(&self) -> Calls {
        return self.calls.lock().unwrap().clone();
    }

    fn next_status(&self) -> RunStatus {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            return statuses.pop_front().unwrap();
        }
        return statuses.front().copied().unwrap_or(RunStatus::Completed);
    }
}

#[async_trait]
impl AssistantsApi for FakeAssistants {
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.calls.lock().unwrap().retrieve_assistant += 1;
        if assistant_id != self.known_assistant {
            bail!("No assistant found with id '{assistant_id}'.");
        }

        return Ok(Assistant {
            id: assistant_id.to_string(),
            name: Some("Math Tutor".to_string()),
            model: "gpt-4o".to_string(),
        });
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.calls.lock().unwrap().create_thread += 1;
        return Ok(Thread {
            id: "thread_abc".to_string(),
        });
    }

    async fn create_message(
        &self,
        _thread_id: &str,
        author: Author,
        text: &str,
    ) -> Result<ThreadMessage> {
        self.calls.lock().unwrap().create_message += 1;
        if self.fail_on_message {
            bail!("connection reset by peer");
        }

        self.sent.lock().unwrap().push(text.to_string());
        return Ok(ThreadMessage {
            id: "msg_user".to_string(),
            role: author.role().to_string(),
            content: MessageContent::default(),
        });
    }

    async fn create_run(&self, thread_id: &str, _assistant_id: &str) -> Result<Run> {
        self.calls.lock().unwrap().create_run += 1;
        return Ok(Run {
            id: "run_abc".to_string(),
            thread_id: thread_id.to_string(),
            status: RunStatus::Queued,
            last_error: None,
        });
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.calls.lock().unwrap().retrieve_run += 1;
        return Ok(Run {
            id: run_id.to_string(),
            thread_id: thread_id.to_string(),
            status: self.next_status(),
            last_error: None,
        });
    }

    async fn list_messages(&self, _thread_id: &str, after_id: &str) -> Result<Vec<ThreadMessage>> {
        self.calls.lock().unwrap().list_messages += 1;
        self.listed_after.lock().unwrap().push(after_id.to_string());
        return Ok(self.replies.lock().unwrap().clone());
    }
}
