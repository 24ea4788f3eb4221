mod action;
mod assistants;
mod author;
mod errors;
mod event;
mod loading;
mod message;
mod poll_policy;
mod slash_commands;
mod textarea;
mod thread;
mod transcript;
mod turn_state;

pub use action::*;
pub use assistants::*;
pub use author::*;
pub use errors::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use poll_policy::*;
pub use slash_commands::*;
pub use textarea::*;
pub use thread::*;
pub use transcript::*;
pub use turn_state::*;
