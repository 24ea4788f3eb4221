#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK: time::Duration = time::Duration::from_millis(500);

/// Maps a key press to a UI event. Unbound keys are handed to the prompt box.
fn key_event(input: Input) -> Event {
    if input.ctrl {
        match input.key {
            Key::Char('c') => return Event::KeyboardCTRLC(),
            Key::Char('d') => return Event::UIScrollPageDown(),
            Key::Char('u') => return Event::UIScrollPageUp(),
            _ => (),
        }
    }

    match input.key {
        Key::Up => return Event::UIScrollUp(),
        Key::Down => return Event::UIScrollDown(),
        Key::PageUp => return Event::UIScrollPageUp(),
        Key::PageDown => return Event::UIScrollPageDown(),
        Key::Enter => return Event::KeyboardEnter(),
        _ => return Event::KeyboardCharInput(input),
    }
}

pub fn terminal_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(keyevent) => {
            // Some terminals report releases too.
            if keyevent.kind != KeyEventKind::Press {
                return None;
            }
            return Some(key_event(keyevent.into()));
        }
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        // Forces a redraw at the new size.
        CrosstermEvent::Resize(_, _) => return Some(Event::UITick()),
        _ => return None,
    }
}

/// Single stream of everything the chat view reacts to: terminal input,
/// events from the actions worker, and a periodic tick.
pub struct EventsService {
    terminal: EventStream,
    worker: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(worker: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal: EventStream::new(),
            worker,
        };
    }

    /// Waits for the next event. Errors once the actions worker has gone away.
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            tokio::select! {
                event = self.worker.recv() => {
                    match event {
                        Some(event) => return Ok(event),
                        None => bail!("The assistant worker stopped unexpectedly"),
                    }
                },
                event = self.terminal.next() => {
                    match event {
                        Some(Ok(event)) => {
                            if let Some(event) = terminal_event(event) {
                                return Ok(event);
                            }
                        }
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "Failed to read terminal event");
                        }
                        None => bail!("Terminal input closed"),
                    }
                },
                _ = time::sleep(TICK) => return Ok(Event::UITick()),
            };
        }
    }
}
