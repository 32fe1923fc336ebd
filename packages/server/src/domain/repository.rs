//! Repository traits.
//!
//! The domain layer defines what it needs from the store; the infrastructure
//! layer provides the implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Participant},
    error::RepositoryError,
    value_object::{MessageLimit, ParticipantName, Timestamp},
};

/// Store of registered participants
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a new participant.
    ///
    /// # Errors
    ///
    /// `RepositoryError::ParticipantAlreadyExists` if the name is taken. The
    /// check and the insert are a single store operation.
    async fn insert(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// Remove the participant with the given name.
    ///
    /// # Errors
    ///
    /// `RepositoryError::ParticipantNotFound` if the name is not registered
    async fn remove(&self, name: &ParticipantName) -> Result<(), RepositoryError>;

    /// Put back participants taken out by `remove_inactive_since`, keeping
    /// their last status. Names registered again in the meantime are skipped.
    async fn restore(&self, participants: Vec<Participant>) -> Result<(), RepositoryError>;

    /// All registered participants, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Participant>, RepositoryError>;

    /// Whether a participant with the given name is registered.
    async fn exists(&self, name: &ParticipantName) -> Result<bool, RepositoryError>;

    /// Set the participant's last status to `at`.
    ///
    /// # Errors
    ///
    /// `RepositoryError::ParticipantNotFound` if the name is not registered
    async fn touch(&self, name: &ParticipantName, at: Timestamp) -> Result<(), RepositoryError>;

    /// Remove every participant whose last status is at or before `cutoff`.
    ///
    /// The staleness check is evaluated together with the delete, so a
    /// participant refreshed concurrently is kept. Returns the removed participants.
    async fn remove_inactive_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<Participant>, RepositoryError>;
}

/// Append-only store of chat messages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append one message.
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError>;

    /// Append several messages as one batch, keeping their order.
    async fn append_all(&self, messages: Vec<ChatMessage>) -> Result<(), RepositoryError>;

    /// Messages visible to `viewer`, most recent first, at most `limit` of them.
    async fn find_visible_to(
        &self,
        viewer: &ParticipantName,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;
}
