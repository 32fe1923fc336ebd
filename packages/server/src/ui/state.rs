//! Server state shared by the HTTP handlers.

use std::sync::Arc;

use crate::domain::{Clock, MessageRepository, ParticipantRepository};

/// Shared application state
///
/// Handlers build a use case per request from these dependencies.
pub struct AppState {
    /// Participant store
    pub participants: Arc<dyn ParticipantRepository>,
    /// Message store
    pub messages: Arc<dyn MessageRepository>,
    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
        }
    }
}
