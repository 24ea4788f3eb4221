#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::Conversation;
use crate::domain::models::Action;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /quit /exit (/q) - Exit Parley.
- /help (/h) - Provides this help menu.

Anything else you type is sent to the assistant. Your conversation lives in a single thread for as long as Parley is open, so the assistant remembers earlier questions.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs submitted turns one at a time until the action channel closes.
    pub async fn start(
        mut conversation: Conversation,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::SubmitTurn(text) => {
                    let state = conversation.handle_turn(&text, &tx).await;
                    tracing::debug!(state = %state, "Turn finished");
                    tx.send(Event::TurnComplete())?;
                }
            }
        }

        return Ok(());
    }
}
