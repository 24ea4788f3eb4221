use tui_textarea::Input;

use super::Message;

pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    /// An entry was appended to the conversation transcript.
    TranscriptEntry(Message),
    /// A turn failed. Shown to the user, never recorded in the transcript.
    TurnFailed(Message),
    TurnComplete(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
