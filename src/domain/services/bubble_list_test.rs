use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_has_no_cached_lines() {
    let bubble_list = BubbleList::new();

    assert_eq!(bubble_list.cache.len(), 0);
    assert!(bubble_list.is_empty());
}

#[test]
fn it_caches_lines() {
    let messages = vec![
        Message::new(Author::Parley, "Hi there!"),
        Message::new(Author::Parley, "First\n\nThird"),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.cache.len(), 2);
}

#[test]
fn it_returns_correct_length() {
    let messages = vec![
        Message::new(Author::Parley, "Hi there!"),
        Message::new(Author::Parley, "First\n\nThird"),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.len(), 8);
}

#[test]
fn it_clears_cache_on_resize() {
    let messages = vec![Message::new(Author::Parley, "Hi there!")];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);
    bubble_list.set_messages(&messages[..0], 80);

    assert_eq!(bubble_list.cache.len(), 0);
    assert_eq!(bubble_list.len(), 0);
}
