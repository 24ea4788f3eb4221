use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use super::SessionClient;
use crate::domain::models::StartupError;
use crate::infrastructure::assistants::fake::FakeAssistants;

#[tokio::test]
async fn it_opens_one_thread() -> Result<()> {
    let fake = Arc::new(FakeAssistants::default());
    let session = SessionClient::connect(fake.clone(), "asst_abc").await?;

    assert_eq!(session.assistant().id, "asst_abc");
    assert_eq!(session.assistant_name(), "Math Tutor");
    assert_eq!(session.thread().id, "thread_abc");

    let calls = fake.calls();
    assert_eq!(calls.retrieve_assistant, 1);
    assert_eq!(calls.create_thread, 1);
    assert_eq!(calls.total(), 2);

    return Ok(());
}

#[tokio::test]
async fn it_fails_without_assistant_id() -> Result<()> {
    let fake = Arc::new(FakeAssistants::default());
    let res = SessionClient::connect(fake.clone(), "  ").await;

    match res {
        Err(StartupError::MissingConfig(key)) => assert!(key.starts_with("assistant-id")),
        _ => bail!("Wrong result"),
    }
    assert_eq!(fake.calls().total(), 0);

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_unknown_assistant() -> Result<()> {
    let fake = Arc::new(FakeAssistants::default());
    let res = SessionClient::connect(fake.clone(), "asst_missing").await;

    match res {
        Err(StartupError::Assistant { assistant_id, .. }) => {
            assert_eq!(assistant_id, "asst_missing")
        }
        _ => bail!("Wrong result"),
    }

    let calls = fake.calls();
    assert_eq!(calls.retrieve_assistant, 1);
    assert_eq!(calls.create_thread, 0);

    return Ok(());
}
