//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod clock;
pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use clock::Clock;
pub use entity::{ChatMessage, JOIN_TEXT, LEAVE_TEXT, Participant};
pub use error::{RepositoryError, ValueObjectError};
pub use repository::{MessageRepository, ParticipantRepository};
pub use value_object::{
    BROADCAST_RECIPIENT, MessageKind, MessageLimit, MessageText, ParticipantName, Recipient,
    Timestamp,
};
