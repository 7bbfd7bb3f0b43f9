use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A chat line as exchanged with the server.
///
/// Two messages with the same `(username, timestamp, content)` triple are the
/// same logical event, even when they arrive twice (optimistic copy + echo).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub content: String,
    pub timestamp: String, // ISO-8601, generated once by the sender
    #[serde(rename = "seenBy", default, deserialize_with = "null_as_empty")]
    pub seen_by: Vec<String>,
}

// `"seenBy": null` reads the same as an absent list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatMessage {
    pub fn new(username: &str, content: &str, timestamp: &str) -> Self {
        Self {
            username: username.to_string(),
            content: content.to_string(),
            timestamp: timestamp.to_string(),
            seen_by: Vec::new(),
        }
    }

    /// Returns `true` when both messages describe the same logical event.
    pub fn same_event(&self, other: &ChatMessage) -> bool {
        self.username == other.username
            && self.timestamp == other.timestamp
            && self.content == other.content
    }

    /// Adds `username` to `seen_by` unless already present.
    /// Returns whether the set grew.
    pub fn add_seen_by(&mut self, username: &str) -> bool {
        if self.seen_by.iter().any(|u| u == username) {
            return false;
        }
        self.seen_by.push(username.to_string());
        true
    }
}

/// Per-room message lists.
///
/// Entries are created lazily and are only ever mutated by the three
/// operations below; a message, once appended, is never removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomMessages {
    rooms: HashMap<String, Vec<ChatMessage>>,
}

impl RoomMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to `room` unless an identical event is already
    /// stored there. Returns `true` when the message was appended.
    pub fn append(&mut self, room: &str, message: ChatMessage) -> bool {
        let list = self.rooms.entry(room.to_string()).or_default();
        if list.iter().any(|m| m.same_event(&message)) {
            return false;
        }
        list.push(message);
        true
    }

    /// Replace the whole list for `room` with the delivered history.
    pub fn replace_history(&mut self, room: &str, messages: Vec<ChatMessage>) {
        self.rooms.insert(room.to_string(), messages);
    }

    /// Record that `username` has seen every message in `room`.
    /// Returns the number of messages whose `seen_by` grew.
    pub fn mark_seen(&mut self, room: &str, username: &str) -> usize {
        match self.rooms.get_mut(room) {
            Some(list) => list
                .iter_mut()
                .map(|m| m.add_seen_by(username))
                .filter(|grew| *grew)
                .count(),
            None => 0,
        }
    }

    pub fn get(&self, room: &str) -> &[ChatMessage] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_room(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn room_names(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }
}
