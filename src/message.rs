use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single display message. Bot messages start as empty placeholders and are
/// filled in by the typing animation; `metadata_visible` flips once, after the
/// content is fully revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub metadata: Vec<String>,
    pub metadata_visible: bool,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            sender: Sender::User,
            content: content.into(),
            metadata: Vec::new(),
            metadata_visible: false,
            timestamp: Local::now(),
        }
    }

    /// An empty bot message holding the metadata that will be revealed once
    /// the typing animation finishes.
    pub fn bot_placeholder(metadata: Vec<String>) -> Self {
        Message {
            sender: Sender::Bot,
            content: String::new(),
            metadata,
            metadata_visible: false,
            timestamp: Local::now(),
        }
    }
}

/// Ordered message sequence. Append-only, except that the final element may
/// be mutated in place; that is the only slot the animator ever touches.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        MessageStore {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn replace_last(&mut self, transform: impl FnOnce(&mut Message)) {
        if let Some(last) = self.messages.last_mut() {
            transform(last);
        }
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order() {
        let mut store = MessageStore::new();
        store.push(Message::user("first"));
        store.push(Message::bot_placeholder(Vec::new()));
        store.push(Message::user("third"));

        let contents: Vec<&str> = store.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "", "third"]);
    }

    #[test]
    fn replace_last_touches_only_the_final_element() {
        let mut store = MessageStore::new();
        store.push(Message::user("hello"));
        store.push(Message::bot_placeholder(vec!["fact A".to_string()]));

        store.replace_last(|m| m.content = "hi".to_string());
        store.replace_last(|m| m.metadata_visible = true);

        assert_eq!(store.iter().next().unwrap().content, "hello");
        let last = store.last().unwrap();
        assert_eq!(last.content, "hi");
        assert!(last.metadata_visible);
    }

    #[test]
    fn replace_last_on_empty_store_is_a_no_op() {
        let mut store = MessageStore::new();
        store.replace_last(|m| m.content = "ghost".to_string());
        assert!(store.is_empty());
    }
}
