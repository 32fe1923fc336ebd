//! Core domain models for the chat application.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::value_object::{MessageKind, MessageText, ParticipantName, Recipient, Timestamp};

/// Text of the status message appended when a participant registers
pub const JOIN_TEXT: &str = "entra na sala...";

/// Text of the status message appended when a participant expires
pub const LEAVE_TEXT: &str = "sai da sala...";

/// Represents a registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant name (unique)
    pub name: ParticipantName,
    /// Timestamp of the last heartbeat, or of the registration
    pub last_status: Timestamp,
}

impl Participant {
    /// Create a new participant
    pub fn new(name: ParticipantName, last_status: Timestamp) -> Self {
        Self { name, last_status }
    }

    /// Whether the participant has been silent for at least `idle_timeout` at `now`
    pub fn is_inactive(&self, now: Timestamp, idle_timeout: Duration) -> bool {
        self.last_status <= now.saturating_sub(idle_timeout)
    }
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender's name
    pub from: ParticipantName,
    /// Recipient's name, or the broadcast sentinel
    pub to: Recipient,
    /// Message body
    pub text: MessageText,
    /// Message kind
    pub kind: MessageKind,
    /// Timestamp when the message was created
    pub sent_at: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(
        from: ParticipantName,
        to: Recipient,
        text: MessageText,
        kind: MessageKind,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            from,
            to,
            text,
            kind,
            sent_at,
        }
    }

    /// Status notice announcing that `name` entered the room
    pub fn joined(name: ParticipantName, at: Timestamp) -> Self {
        Self::status(name, JOIN_TEXT, at)
    }

    /// Status notice announcing that `name` left the room
    pub fn left(name: ParticipantName, at: Timestamp) -> Self {
        Self::status(name, LEAVE_TEXT, at)
    }

    fn status(name: ParticipantName, text: &'static str, at: Timestamp) -> Self {
        Self {
            from: name,
            to: Recipient::broadcast(),
            text: MessageText::from_constant(text),
            kind: MessageKind::Status,
            sent_at: at,
        }
    }

    /// Whether `viewer` may see this message.
    ///
    /// A message is visible to its sender and recipient, and to everyone when it
    /// is a room message or addressed to the broadcast sentinel.
    pub fn is_visible_to(&self, viewer: &ParticipantName) -> bool {
        &self.from == viewer
            || self.to.is(viewer)
            || self.kind == MessageKind::Message
            || self.to.is_broadcast()
    }
}
