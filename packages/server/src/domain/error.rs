//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ParticipantName validation error
    #[error("name cannot be empty")]
    ParticipantNameEmpty,

    /// ParticipantName too long error
    #[error("name cannot exceed {max} characters (got {actual})")]
    ParticipantNameTooLong { max: usize, actual: usize },

    /// Recipient validation error
    #[error("to cannot be empty")]
    RecipientEmpty,

    /// Recipient too long error
    #[error("to cannot exceed {max} characters (got {actual})")]
    RecipientTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Unknown message type
    #[error("type must be one of message, private_message, status (got: {0})")]
    UnknownMessageKind(String),

    /// Message type reserved for the system
    #[error("type must be message or private_message (got: {0})")]
    MessageKindNotPostable(String),

    /// Listing limit is not a positive integer
    #[error("limit must be a positive integer (got: {0})")]
    InvalidLimit(String),
}

/// Errors raised by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A participant with the same name is already registered
    #[error("participant already exists: {0}")]
    ParticipantAlreadyExists(String),

    /// No participant with the given name is registered
    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    /// A stored record could not be turned back into a domain model
    #[error("invalid stored record: {0}")]
    InvalidRecord(String),

    /// The underlying store failed
    #[error("storage failure: {0}")]
    Storage(String),
}
