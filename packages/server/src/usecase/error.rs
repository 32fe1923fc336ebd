//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RepositoryError;

/// Errors returned by the chat use cases
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// A participant with the same name is already registered
    #[error("participant '{0}' already exists")]
    ParticipantAlreadyExists(String),

    /// The acting participant is not registered
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    /// The store failed
    #[error("store error: {0}")]
    Store(RepositoryError),
}

impl From<RepositoryError> for ChatError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::ParticipantAlreadyExists(name) => Self::ParticipantAlreadyExists(name),
            RepositoryError::ParticipantNotFound(name) => Self::ParticipantNotFound(name),
            other => Self::Store(other),
        }
    }
}
