#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use super::SessionClient;
use crate::domain::models::AssistantsApi;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::PollPolicy;
use crate::domain::models::Run;
use crate::domain::models::Transcript;
use crate::domain::models::TurnError;
use crate::domain::models::TurnState;

/// Recorded as the reply when a run finishes without any usable text.
pub const NO_VALID_RESPONSE: &str = "No valid response was found.";

/// Recorded as the reply when a turn fails.
pub const TURN_FAILED: &str = "Error processing your request.";

/// Polls a run until it leaves the pending states, backing off between
/// polls. Gives up with `TurnError::Timeout` once the policy's timeout has
/// elapsed.
pub async fn wait_on_run(
    api: &(dyn AssistantsApi + Send + Sync),
    thread_id: &str,
    mut run: Run,
    policy: &PollPolicy,
) -> Result<Run> {
    let started = time::Instant::now();
    let mut delay = policy.interval;

    while run.status.is_pending() {
        let waited = started.elapsed();
        if waited >= policy.timeout {
            tracing::warn!(run_id = %run.id, status = %run.status, "Gave up waiting on run");
            return Err(TurnError::Timeout { waited }.into());
        }

        time::sleep(delay.min(policy.timeout - waited)).await;
        delay = policy.next_delay(delay);

        run = api.retrieve_run(thread_id, &run.id).await?;
        tracing::debug!(run_id = %run.id, status = %run.status, "Polled run");
    }

    return Ok(run);
}

fn emit(tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if tx.send(event).is_err() {
        tracing::warn!("Event receiver dropped, transcript update not displayed");
    }
}

/// Session-scoped conversation: the open session plus the transcript of
/// everything said in it.
pub struct Conversation {
    session: SessionClient,
    transcript: Transcript,
    poll: PollPolicy,
    state: TurnState,
}

impl Conversation {
    pub fn new(session: SessionClient, poll: PollPolicy) -> Conversation {
        return Conversation {
            session,
            transcript: Transcript::default(),
            poll,
            state: TurnState::Idle,
        };
    }

    pub fn session(&self) -> &SessionClient {
        return &self.session;
    }

    pub fn transcript(&self) -> &Transcript {
        return &self.transcript;
    }

    pub fn state(&self) -> TurnState {
        return self.state;
    }

    fn transition(&mut self, next: TurnState) {
        tracing::debug!(from = %self.state, to = %next, "Turn state");
        self.state = next;
    }

    /// Runs one user turn. Blank input is ignored. Otherwise exactly one user
    /// entry and one assistant entry are appended to the transcript, each
    /// emitted as soon as it is recorded. Failures are contained here: they
    /// are emitted as `Event::TurnFailed` and the assistant entry becomes
    /// `TURN_FAILED`.
    ///
    /// Returns the state the turn finished in, which is `Idle` for ignored
    /// input.
    pub async fn handle_turn(
        &mut self,
        user_text: &str,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> TurnState {
        if user_text.trim().is_empty() {
            return TurnState::Idle;
        }

        let entry = self.transcript.push_user(user_text).clone();
        emit(tx, Event::TranscriptEntry(entry));
        self.transition(TurnState::Submitted);

        let outcome = match self.run_turn(user_text).await {
            Ok(reply) => {
                let entry = self.transcript.push_assistant(&reply).clone();
                emit(tx, Event::TranscriptEntry(entry));
                TurnState::Completed
            }
            Err(err) => {
                tracing::error!(error = ?err, "Turn failed");
                emit(
                    tx,
                    Event::TurnFailed(Message::new_with_type(
                        Author::Parley,
                        MessageType::Error,
                        &format!("Error processing your request: {err}"),
                    )),
                );

                let entry = self.transcript.push_assistant_error(TURN_FAILED).clone();
                emit(tx, Event::TranscriptEntry(entry));
                TurnState::Errored
            }
        };

        self.transition(outcome);
        self.transition(TurnState::Idle);

        return outcome;
    }

    async fn run_turn(&mut self, user_text: &str) -> Result<String> {
        let api = self.session.api();
        let thread_id = self.session.thread().id.to_string();
        let assistant_id = self.session.assistant().id.to_string();

        let message = api
            .create_message(&thread_id, Author::User, user_text)
            .await?;
        let run = api.create_run(&thread_id, &assistant_id).await?;
        self.transition(TurnState::Running);

        let run = wait_on_run(api.as_ref(), &thread_id, run, &self.poll).await?;
        if !run.status.is_success() {
            return Err(TurnError::RunFailed {
                status: run.status,
                reason: run.last_error.map(|err| return err.message),
            }
            .into());
        }

        let messages = api.list_messages(&thread_id, &message.id).await?;
        let reply = messages.first().ok_or(TurnError::NoReply)?;

        return Ok(reply
            .content
            .text()
            .unwrap_or(NO_VALID_RESPONSE)
            .to_string());
    }
}
