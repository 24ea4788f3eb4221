#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use super::Author;
use super::Message;
use super::MessageType;

/// Ordered, append-only record of what was said during the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn push_user(&mut self, text: &str) -> &Message {
        return self.push(Message::new(Author::User, text));
    }

    pub fn push_assistant(&mut self, text: &str) -> &Message {
        return self.push(Message::new(Author::Assistant, text));
    }

    /// Records the fallback reply of a failed turn.
    pub fn push_assistant_error(&mut self, text: &str) -> &Message {
        return self.push(Message::new_with_type(
            Author::Assistant,
            MessageType::Error,
            text,
        ));
    }

    fn push(&mut self, message: Message) -> &Message {
        self.entries.push(message);
        return &self.entries[self.entries.len() - 1];
    }

    pub fn entries(&self) -> &[Message] {
        return &self.entries;
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
