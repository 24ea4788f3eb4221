use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::help_text;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::PollPolicy;
use crate::domain::models::RunStatus;
use crate::domain::services::Conversation;
use crate::domain::services::SessionClient;
use crate::infrastructure::assistants::fake::text_reply;
use crate::infrastructure::assistants::fake::FakeAssistants;

#[tokio::test]
async fn it_reports_every_turn_complete() -> Result<()> {
    let fake = Arc::new(FakeAssistants::with_script(
        vec![RunStatus::InProgress, RunStatus::Completed],
        vec![text_reply("msg_reply", "4")],
    ));
    let session = SessionClient::connect(fake.clone(), "asst_abc").await?;
    let conversation = Conversation::new(
        session,
        PollPolicy {
            interval: Duration::ZERO,
            max_interval: Duration::ZERO,
            timeout: Duration::from_secs(30),
        },
    );

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    action_tx.send(Action::SubmitTurn("What is 2+2?".to_string()))?;
    action_tx.send(Action::SubmitTurn("".to_string()))?;
    drop(action_tx);

    ActionsService::start(conversation, event_tx, &mut action_rx).await?;

    let mut entries = vec![];
    let mut completions = 0;
    while let Some(event) = event_rx.recv().await {
        match event {
            Event::TranscriptEntry(message) => entries.push(message.text),
            Event::TurnComplete() => completions += 1,
            _ => (),
        }
    }

    assert_eq!(entries, vec!["What is 2+2?".to_string(), "4".to_string()]);
    assert_eq!(completions, 2);

    return Ok(());
}

#[test]
fn it_lists_commands_in_help() {
    let help = help_text();
    assert!(help.starts_with("COMMANDS:"));
    assert!(help.contains("/quit"));
    assert!(help.contains("CTRL+C"));
}
