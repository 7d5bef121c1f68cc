use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{NewParticipant, Participant, ParticipantPatch},
    server::EventumServer,
};

/// Query parameters accepted by the participant list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListParticipantsQuery {
    /// Case-insensitive substring match on the participant name.
    pub name: Option<String>,
    /// Case-insensitive substring match on the participant email.
    pub email: Option<String>,
    /// Sort key, `name` or `registration_date`; unknown keys are ignored.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` (default) or `desc`.
    pub order: Option<String>,
}

/// Enroll a participant in an event
#[utoipa::path(
    post,
    path = "/events/{event_id}/participants/",
    params(
        ("event_id" = String, Path, description = "Event id")
    ),
    request_body = NewParticipant,
    responses(
        (status = 201, description = "Participant enrolled", body = Participant),
        (status = 400, description = "Capacity reached, duplicate id or invalid payload"),
        (status = 404, description = "Event not found")
    ),
    tag = "participants"
)]
pub async fn add_participant(
    State(server): State<EventumServer>,
    Path(event_id): Path<String>,
    Json(registration): Json<NewParticipant>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    let participant = server.participants.add(&event_id, registration).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// Get a participant by id
#[utoipa::path(
    get,
    path = "/events/{event_id}/participants/{participant_id}",
    params(
        ("event_id" = String, Path, description = "Event id"),
        ("participant_id" = String, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant retrieved", body = Participant),
        (status = 404, description = "Event or participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(server): State<EventumServer>,
    Path((event_id, participant_id)): Path<(String, String)>,
) -> Result<Json<Participant>, ApiError> {
    let participant = server.participants.get(&event_id, &participant_id).await?;
    Ok(Json(participant))
}

/// List an event's participants with optional filters
#[utoipa::path(
    get,
    path = "/events/{event_id}/participants/",
    params(
        ("event_id" = String, Path, description = "Event id"),
        ListParticipantsQuery
    ),
    responses(
        (status = 200, description = "Participants retrieved", body = Vec<Participant>),
        (status = 404, description = "Event not found")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(server): State<EventumServer>,
    Path(event_id): Path<String>,
    Query(query): Query<ListParticipantsQuery>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    let participants = server
        .participants
        .list(
            &event_id,
            query.name.as_deref(),
            query.email.as_deref(),
            query.sort_by.as_deref(),
            query.order.as_deref(),
        )
        .await?;
    Ok(Json(participants))
}

/// Update a participant
#[utoipa::path(
    put,
    path = "/events/{event_id}/participants/{participant_id}",
    params(
        ("event_id" = String, Path, description = "Event id"),
        ("participant_id" = String, Path, description = "Participant id")
    ),
    request_body = ParticipantPatch,
    responses(
        (status = 200, description = "Participant updated", body = Participant),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Event or participant not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(server): State<EventumServer>,
    Path((event_id, participant_id)): Path<(String, String)>,
    Json(patch): Json<ParticipantPatch>,
) -> Result<Json<Participant>, ApiError> {
    let participant = server
        .participants
        .update(&event_id, &participant_id, patch)
        .await?;
    Ok(Json(participant))
}

/// Remove a participant from an event
#[utoipa::path(
    delete,
    path = "/events/{event_id}/participants/{participant_id}",
    params(
        ("event_id" = String, Path, description = "Event id"),
        ("participant_id" = String, Path, description = "Participant id")
    ),
    responses(
        (status = 204, description = "Participant removed"),
        (status = 404, description = "Event or participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(server): State<EventumServer>,
    Path((event_id, participant_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    server
        .participants
        .remove(&event_id, &participant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
