#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use strum::EnumIter;
use strum::IntoEnumIterator;

/// Commands handled by the chat view itself. They are never sent to the
/// assistant and never enter the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SlashCommand {
    Quit,
    Help,
}

impl SlashCommand {
    /// Every spelling that triggers the command, long form first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SlashCommand::Quit => return &["/quit", "/q", "/exit"],
            SlashCommand::Help => return &["/help", "/h"],
        }
    }

    /// Matches the first word of the input. Anything after it is ignored.
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let prefix = text.split_whitespace().next()?;
        return SlashCommand::iter().find(|command| return command.aliases().contains(&prefix));
    }

    pub fn is_quit(&self) -> bool {
        return *self == SlashCommand::Quit;
    }

    pub fn is_help(&self) -> bool {
        return *self == SlashCommand::Help;
    }
}
