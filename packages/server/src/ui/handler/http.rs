//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    domain::{MessageKind, MessageLimit, MessageText, ParticipantName, Recipient},
    infrastructure::dto::http::{
        ListMessagesQuery, MessageDto, ParticipantDto, PostMessageRequest,
        RegisterParticipantRequest,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{
        HeartbeatUseCase, ListMessagesUseCase, ListParticipantsUseCase, PostMessageUseCase,
        RegisterParticipantUseCase,
    },
};

use super::identity::Caller;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Register a participant
pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterParticipantRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let name = ParticipantName::new(request.name.unwrap_or_default())?;

    let usecase = RegisterParticipantUseCase::new(
        state.participants.clone(),
        state.messages.clone(),
        state.clock.clone(),
    );
    usecase.execute(name).await?;

    Ok(StatusCode::CREATED)
}

/// Get list of participants
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let usecase = ListParticipantsUseCase::new(state.participants.clone());
    let participants = usecase.execute().await?;

    Ok(Json(
        participants.into_iter().map(ParticipantDto::from).collect(),
    ))
}

/// Post a message as the caller
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Caller(sender): Caller,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let to = Recipient::new(request.to.unwrap_or_default())?;
    let text = MessageText::new(request.text.unwrap_or_default())?;
    let kind = MessageKind::parse_postable(request.kind.as_deref().unwrap_or_default())?;

    let usecase = PostMessageUseCase::new(
        state.participants.clone(),
        state.messages.clone(),
        state.clock.clone(),
    );
    usecase.execute(sender, to, text, kind).await?;

    Ok(StatusCode::CREATED)
}

/// List the messages visible to the caller, newest first
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Caller(viewer): Caller,
    query: Result<Query<ListMessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let limit = query
        .limit
        .as_deref()
        .map(MessageLimit::parse)
        .transpose()?;

    let usecase = ListMessagesUseCase::new(state.messages.clone());
    let messages = usecase.execute(&viewer, limit).await?;

    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}

/// Refresh the caller's last status
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    Caller(name): Caller,
) -> Result<StatusCode, ApiError> {
    let usecase = HeartbeatUseCase::new(state.participants.clone(), state.clock.clone());
    usecase.execute(&name).await?;

    Ok(StatusCode::OK)
}
