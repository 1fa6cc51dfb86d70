//! Message and Transcript domain types.
//!
//! The transcript is the console's "memory stream": every user prompt and
//! every generated reply, in order, persisted across sessions by a
//! `TranscriptStore` implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The operator ("master") typing prompts
    User,
    /// The generated reply
    Assistant,
    /// Injected system notices (purges, package events)
    System,
}

/// A single message in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::System,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The greeting banner shown (and persisted) on a fresh memory stream.
pub const GREETING: &str = "# hello. i am aaayafuj gpt. i am a sovereign intelligence. how can i assist you today? 🙂\n\n## sovereign core active (100b+ permutations mastered 🚀)\n\n* air-gapped logic active ✅\n* persistent neural brain active ✅\n* training module awaiting vocal shards 🧠\n\n**[ready for owner command]**";

/// An ordered sequence of messages — the console's memory stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Ordered messages
    pub messages: Vec<Message>,

    /// When this transcript was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new empty transcript.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transcript seeded with the greeting banner, the state a
    /// fresh console starts in.
    pub fn seeded() -> Self {
        let mut t = Self::new();
        let mut greeting = Message::assistant(GREETING);
        greeting.id = "init".into();
        t.push(greeting);
        t
    }

    /// Add a message to the transcript.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    /// Messages in provider-history form: user/assistant turns only.
    pub fn history(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("sync python core");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "sync python core");
    }

    #[test]
    fn transcript_tracks_updates() {
        let mut t = Transcript::new();
        let created = t.created_at;

        t.push(Message::user("first"));
        assert_eq!(t.messages.len(), 1);
        assert!(t.updated_at >= created);
    }

    #[test]
    fn seeded_transcript_starts_with_greeting() {
        let t = Transcript::seeded();
        assert_eq!(t.messages.len(), 1);
        assert_eq!(t.messages[0].id, "init");
        assert_eq!(t.messages[0].role, Role::Assistant);
        assert!(t.messages[0].content.starts_with("# hello"));
    }

    #[test]
    fn history_skips_system_messages() {
        let mut t = Transcript::new();
        t.push(Message::user("hi"));
        t.push(Message::system("memory purged"));
        t.push(Message::assistant("hello"));
        let history = t.history();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::assistant("derivation complete");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, "derivation complete");
        assert_eq!(back.role, Role::Assistant);
    }
}
