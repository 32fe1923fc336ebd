//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{
    fmt,
    num::{IntErrorKind, NonZeroUsize},
    str::FromStr,
    time::Duration,
};

use super::error::ValueObjectError;

/// Maximum length (bytes) of a participant name or a recipient
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length (bytes) of a message body
pub const MAX_TEXT_LENGTH: usize = 10000;

/// Recipient value meaning "visible to all participants"
pub const BROADCAST_RECIPIENT: &str = "Todos";

/// Participant name value object.
///
/// Unique, case-sensitive identifier of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a new ParticipantName.
    ///
    /// # Arguments
    ///
    /// * `name` - The participant name string
    ///
    /// # Returns
    ///
    /// A Result containing the ParticipantName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::ParticipantNameEmpty);
        }
        let len = name.len();
        if len > MAX_NAME_LENGTH {
            return Err(ValueObjectError::ParticipantNameTooLong {
                max: MAX_NAME_LENGTH,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message recipient value object.
///
/// Either a participant name or the broadcast sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient(String);

impl Recipient {
    /// Create a new Recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient is empty or too long
    pub fn new(to: String) -> Result<Self, ValueObjectError> {
        if to.is_empty() {
            return Err(ValueObjectError::RecipientEmpty);
        }
        let len = to.len();
        if len > MAX_NAME_LENGTH {
            return Err(ValueObjectError::RecipientTooLong {
                max: MAX_NAME_LENGTH,
                actual: len,
            });
        }
        Ok(Self(to))
    }

    /// The broadcast recipient.
    pub fn broadcast() -> Self {
        Self(BROADCAST_RECIPIENT.to_string())
    }

    /// Whether this recipient is the broadcast sentinel.
    pub fn is_broadcast(&self) -> bool {
        self.0 == BROADCAST_RECIPIENT
    }

    /// Whether this recipient addresses the given participant.
    pub fn is(&self, name: &ParticipantName) -> bool {
        self.0 == name.as_str()
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message text value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty or too long
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.len();
        if len > MAX_TEXT_LENGTH {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MAX_TEXT_LENGTH,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Build a text from a non-empty constant shorter than the limit.
    pub(super) fn from_constant(text: &'static str) -> Self {
        Self(text.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Visible to everyone in the room
    Message,
    /// Visible to its sender and recipient only
    PrivateMessage,
    /// System-generated join/leave notice
    Status,
}

impl MessageKind {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }

    /// Parse a kind that a participant is allowed to post.
    ///
    /// `status` is reserved for system-generated notices.
    pub fn parse_postable(value: &str) -> Result<Self, ValueObjectError> {
        match value.parse::<Self>()? {
            Self::Status => Err(ValueObjectError::MessageKindNotPostable(value.to_string())),
            kind => Ok(kind),
        }
    }
}

impl FromStr for MessageKind {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Ok(Self::Status),
            other => Err(ValueObjectError::UnknownMessageKind(other.to_string())),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum number of messages returned by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLimit(NonZeroUsize);

impl MessageLimit {
    /// Create a limit from a count.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero
    pub fn new(count: usize) -> Result<Self, ValueObjectError> {
        NonZeroUsize::new(count)
            .map(Self)
            .ok_or_else(|| ValueObjectError::InvalidLimit(count.to_string()))
    }

    /// Parse a limit from its query-string form. Only positive integers are
    /// accepted; values beyond `usize::MAX` are clamped to it.
    pub fn parse(raw: &str) -> Result<Self, ValueObjectError> {
        let count = match raw.trim().parse::<usize>() {
            Ok(count) => count,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => usize::MAX,
            Err(_) => return Err(ValueObjectError::InvalidLimit(raw.to_string())),
        };
        Self::new(count).map_err(|_| ValueObjectError::InvalidLimit(raw.to_string()))
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0.get()
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// The timestamp `duration` earlier than this one.
    pub fn saturating_sub(&self, duration: Duration) -> Self {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self(self.0.saturating_sub(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
