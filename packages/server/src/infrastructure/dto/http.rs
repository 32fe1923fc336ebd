//! HTTP API request/response DTOs for the chat application.

use lounge_shared::time::format_local_time_of_day;
use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Participant};

/// Body of `POST /participants`
///
/// Fields are optional so that a missing field is reported as a validation
/// error by the handler rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub name: Option<String>,
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub to: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Query string of `GET /messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesQuery {
    pub limit: Option<String>,
}

/// Participant entry of `GET /participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub name: String,
    pub last_status: i64, // Unix millis
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            name: participant.name.into_string(),
            last_status: participant.last_status.value(),
        }
    }
}

/// Message entry of `GET /messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String, // HH:mm:ss, server local time
}

impl From<ChatMessage> for MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            time: format_local_time_of_day(message.sent_at.value()).unwrap_or_default(),
            from: message.from.into_string(),
            to: message.to.to_string(),
            text: message.text.to_string(),
            kind: message.kind.as_str().to_string(),
        }
    }
}
