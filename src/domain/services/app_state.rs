#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::SlashCommand;

/// What the chat view displays. The transcript itself lives with the actions
/// worker, this keeps a mirror of it plus any local notices.
pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub waiting_for_assistant: bool,
}

impl<'a> AppState<'a> {
    pub fn new(assistant_name: &str) -> AppState<'a> {
        return AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![Message::new(
                Author::Parley,
                &format!("You're chatting with {assistant_name}. Ask away, or type /help to see what else I can do."),
            )],
            scroll: Scroll::default(),
            waiting_for_assistant: false,
        };
    }

    /// Handles local commands. Returns `(should_break, should_continue)` for
    /// the UI loop.
    pub fn handle_slash_commands(&mut self, input_str: &str) -> (bool, bool) {
        if let Some(command) = SlashCommand::parse(input_str) {
            if command.is_quit() {
                return (true, false);
            }

            if command.is_help() {
                self.add_message(Message::new(Author::Parley, &help_text()));
                return (false, true);
            }
        }

        return (false, false);
    }

    /// Sends the prompt to the actions worker. Blank prompts, and prompts
    /// made while a turn is running, are dropped.
    pub fn submit(&mut self, input_str: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if input_str.trim().is_empty() || self.waiting_for_assistant {
            return Ok(false);
        }

        tx.send(Action::SubmitTurn(input_str.to_string()))?;
        self.waiting_for_assistant = true;
        self.sync_dependants();

        return Ok(true);
    }

    pub fn handle_transcript_entry(&mut self, message: Message) {
        self.add_message(message);
    }

    pub fn handle_turn_failed(&mut self, notice: Message) {
        self.add_message(notice);
    }

    pub fn handle_turn_complete(&mut self) {
        self.waiting_for_assistant = false;
        self.sync_dependants();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll.set_state(
            u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX),
            self.last_known_height,
        );

        if self.waiting_for_assistant {
            self.scroll.last();
        }
    }
}
