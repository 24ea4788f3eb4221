#[cfg(test)]
#[path = "thread_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
}

/// Lifecycle of a run as reported by the service. Anything the service adds
/// later lands in `Unknown` and is treated as terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn is_pending(&self) -> bool {
        return matches!(self, RunStatus::Queued | RunStatus::InProgress);
    }

    pub fn is_success(&self) -> bool {
        return *self == RunStatus::Completed;
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: Option<TextValue>,
    },
    #[serde(other)]
    Other,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectContent {
    #[serde(default)]
    pub text: Option<TextValue>,
}

/// Message content arrives either as a list of typed blocks or as a single
/// object carrying the text directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Blocks(Vec<ContentBlock>),
    Direct(DirectContent),
}

impl Default for MessageContent {
    fn default() -> MessageContent {
        return MessageContent::Blocks(vec![]);
    }
}

impl MessageContent {
    /// Returns the first non-empty text payload, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Blocks(blocks) => {
                return blocks.iter().find_map(|block| match block {
                    ContentBlock::Text { text: Some(text) } if !text.value.is_empty() => {
                        return Some(text.value.as_str());
                    }
                    _ => return None,
                });
            }
            MessageContent::Direct(DirectContent { text: Some(text) })
                if !text.value.is_empty() =>
            {
                return Some(text.value.as_str());
            }
            MessageContent::Direct(_) => return None,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: MessageContent,
}
