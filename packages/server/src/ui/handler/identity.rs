//! Caller identity taken from the `user` request header.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{domain::ParticipantName, ui::error::ApiError};

/// Header carrying the acting participant's name
pub const USER_HEADER: &str = "user";

/// Name of the participant making the request.
///
/// Rejects with 404 when the header is missing, empty or not a valid name,
/// the same class as an unknown participant.
#[derive(Debug, Clone)]
pub struct Caller(pub ParticipantName);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .ok_or_else(ApiError::missing_identity)?;

        // names may be UTF-8, which HeaderValue::to_str rejects
        let raw = String::from_utf8(value.as_bytes().to_vec())
            .map_err(|_| ApiError::missing_identity())?;

        ParticipantName::new(raw)
            .map(Caller)
            .map_err(|_| ApiError::missing_identity())
    }
}
