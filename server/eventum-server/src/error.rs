//! API error type and HTTP mapping.
//!
//! Every failure maps deterministically onto a status code and a
//! `{"detail": <message>}` JSON body: the not-found kinds map to 404,
//! everything else to 400. Nothing is retried and nothing is swallowed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use document_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Error kinds surfaced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    AlreadyExists,
    EventNotFound,
    ParticipantNotFound,
    CapacityExceeded,
    DuplicateParticipant,
    InvalidState,
    InvalidArgument,
    Store,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn already_exists() -> Self {
        Self::new(
            ApiErrorKind::AlreadyExists,
            "An event with this id already exists.",
        )
    }

    pub fn event_not_found() -> Self {
        Self::new(ApiErrorKind::EventNotFound, "Event not found.")
    }

    pub fn participant_not_found() -> Self {
        Self::new(ApiErrorKind::ParticipantNotFound, "Participant not found.")
    }

    pub fn capacity_exceeded() -> Self {
        Self::new(ApiErrorKind::CapacityExceeded, "Event capacity reached.")
    }

    pub fn duplicate_participant() -> Self {
        Self::new(
            ApiErrorKind::DuplicateParticipant,
            "A participant with this id is already enrolled.",
        )
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidState, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidArgument, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Store, message)
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::EventNotFound | ApiErrorKind::ParticipantNotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Point reads and writes always address event documents, so a missing
/// document maps to the event 404; everything else is a 400 passthrough.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::event_not_found(),
            StoreError::Conflict => Self::already_exists(),
            StoreError::PreconditionFailed => Self::store(
                "The event was modified concurrently; retry the request.",
            ),
            other => Self::store(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.message }))).into_response()
    }
}
