use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{Event, EventPatch},
    server::EventumServer,
};

/// Query parameters accepted by the event list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListEventsQuery {
    /// Calendar date to filter on, `YYYY-MM-DD`; matched as a prefix of the
    /// stored date string.
    pub date: Option<String>,
    /// Exact location match.
    pub location: Option<String>,
    /// Sort key, `date` or `name`; unknown keys are ignored.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` (default) or `desc`.
    pub order: Option<String>,
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/events/",
    request_body = Event,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid payload or id already taken")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(server): State<EventumServer>,
    Json(event): Json<Event>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = server.events.create(event).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event retrieved", body = Event),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(server): State<EventumServer>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = server.events.get(&event_id).await?;
    Ok(Json(event))
}

/// List events with optional filters
#[utoipa::path(
    get,
    path = "/events/",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Events retrieved", body = Vec<Event>),
        (status = 400, description = "Malformed date filter")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(server): State<EventumServer>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = server
        .events
        .list(
            query.date.as_deref(),
            query.location.as_deref(),
            query.sort_by.as_deref(),
            query.order.as_deref(),
        )
        .await?;
    Ok(Json(events))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event id")
    ),
    request_body = EventPatch,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid payload or capacity below enrollment"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(server): State<EventumServer>,
    Path(event_id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, ApiError> {
    let event = server.events.update(&event_id, patch).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(server): State<EventumServer>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    server.events.delete(&event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
