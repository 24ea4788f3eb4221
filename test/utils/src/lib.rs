/// A list messages payload as returned by the Assistants API, holding a single
/// assistant reply with an image block ahead of the text block.
pub fn message_list_fixture() -> &'static str {
    return r#"
{
  "object": "list",
  "data": [
    {
      "id": "msg_reply",
      "object": "thread.message",
      "created_at": 1699012949,
      "thread_id": "thread_abc",
      "role": "assistant",
      "content": [
        {
          "type": "image_file",
          "image_file": { "file_id": "file_abc" }
        },
        {
          "type": "text",
          "text": { "value": "2 + 2 is 4.", "annotations": [] }
        }
      ],
      "assistant_id": "asst_abc",
      "run_id": "run_abc"
    }
  ],
  "first_id": "msg_reply",
  "last_id": "msg_reply",
  "has_more": false
}
"#
    .trim();
}
