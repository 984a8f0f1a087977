// src/transcript.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Immutable once created; ordering is by id,
/// the timestamp is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

/// Append-only message store for one session. Ids are assigned here and
/// only here, strictly increasing in append order, never reused.
#[derive(Debug)]
pub struct Transcript {
    entries: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a message and returns a reference to the stored entry.
    pub fn append(&mut self, sender: Sender, content: impl Into<String>) -> &Message {
        let message = Message {
            id: self.next_id,
            sender,
            content: content.into(),
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.entries.push(message);
        &self.entries[self.entries.len() - 1]
    }

    /// Read-only view of the transcript in append order.
    pub fn all(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
