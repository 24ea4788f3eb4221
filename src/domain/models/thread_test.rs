use anyhow::Result;

use super::ContentBlock;
use super::DirectContent;
use super::MessageContent;
use super::RunStatus;
use super::TextValue;
use super::ThreadMessage;

fn text_block(value: &str) -> ContentBlock {
    return ContentBlock::Text {
        text: Some(TextValue {
            value: value.to_string(),
        }),
    };
}

#[test]
fn it_extracts_single_text_block() {
    let content = MessageContent::Blocks(vec![text_block("hi")]);
    assert_eq!(content.text(), Some("hi"));
}

#[test]
fn it_extracts_first_text_block_after_other_blocks() {
    let content = MessageContent::Blocks(vec![ContentBlock::Other, text_block("hi")]);
    assert_eq!(content.text(), Some("hi"));
}

#[test]
fn it_skips_empty_text_blocks() {
    let content = MessageContent::Blocks(vec![
        text_block(""),
        ContentBlock::Text { text: None },
        text_block("second"),
        text_block("third"),
    ]);
    assert_eq!(content.text(), Some("second"));
}

#[test]
fn it_returns_none_for_empty_blocks() {
    let content = MessageContent::Blocks(vec![]);
    assert_eq!(content.text(), None);
}

#[test]
fn it_returns_none_without_text_blocks() {
    let content = MessageContent::Blocks(vec![ContentBlock::Other]);
    assert_eq!(content.text(), None);
}

#[test]
fn it_extracts_direct_text() {
    let content = MessageContent::Direct(DirectContent {
        text: Some(TextValue {
            value: "hi".to_string(),
        }),
    });
    assert_eq!(content.text(), Some("hi"));
}

#[test]
fn it_returns_none_for_direct_without_text() {
    let content = MessageContent::Direct(DirectContent { text: None });
    assert_eq!(content.text(), None);
}

#[test]
fn it_deserializes_block_list() -> Result<()> {
    let msg: ThreadMessage = serde_json::from_str(
        r#"{
            "id": "msg_1",
            "role": "assistant",
            "content": [
                { "type": "image_file", "image_file": { "file_id": "file_1" } },
                { "type": "text", "text": { "value": "hi", "annotations": [] } }
            ]
        }"#,
    )?;

    assert_eq!(msg.id, "msg_1");
    assert_eq!(
        msg.content,
        MessageContent::Blocks(vec![ContentBlock::Other, text_block("hi")])
    );
    assert_eq!(msg.content.text(), Some("hi"));

    return Ok(());
}

#[test]
fn it_deserializes_direct_content() -> Result<()> {
    let msg: ThreadMessage = serde_json::from_str(
        r#"{ "id": "msg_1", "role": "assistant", "content": { "text": { "value": "hi" } } }"#,
    )?;

    assert_eq!(msg.content.text(), Some("hi"));

    return Ok(());
}

#[test]
fn it_deserializes_run_statuses() -> Result<()> {
    let statuses: Vec<RunStatus> = serde_json::from_str(
        r#"["queued", "in_progress", "completed", "failed", "expired", "something_new"]"#,
    )?;

    assert_eq!(
        statuses,
        vec![
            RunStatus::Queued,
            RunStatus::InProgress,
            RunStatus::Completed,
            RunStatus::Failed,
            RunStatus::Expired,
            RunStatus::Unknown,
        ]
    );

    return Ok(());
}

#[test]
fn it_classifies_run_statuses() {
    assert!(RunStatus::Queued.is_pending());
    assert!(RunStatus::InProgress.is_pending());
    assert!(!RunStatus::Completed.is_pending());
    assert!(!RunStatus::Failed.is_pending());
    assert!(!RunStatus::Unknown.is_pending());

    assert!(RunStatus::Completed.is_success());
    assert!(!RunStatus::Cancelled.is_success());
}

#[test]
fn it_displays_run_statuses_in_api_form() {
    assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
    assert_eq!(RunStatus::RequiresAction.to_string(), "requires_action");
}
