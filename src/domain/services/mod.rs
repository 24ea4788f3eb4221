pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod conversation;
pub mod events;
mod scroll;
mod session_client;
mod syntaxes;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use scroll::*;
pub use session_client::*;
pub use syntaxes::*;
