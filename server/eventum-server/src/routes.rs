pub mod paths {
    //! Route path constants. Collection paths keep their trailing slash;
    //! the item paths do not.

    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/version";

    pub const EVENTS: &str = "/events/";
    pub const EVENT_BY_ID: &str = "/events/:event_id";
    pub const PARTICIPANTS: &str = "/events/:event_id/participants/";
    pub const PARTICIPANT_BY_ID: &str = "/events/:event_id/participants/:participant_id";

    pub const PARTICIPANTS_COUNT: &str = "/reports/participants-count/";
}

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    handlers::{events, health, participants, reports},
    openapi,
    server::EventumServer,
};

/// Create health check routes
pub fn health_routes() -> Router<EventumServer> {
    Router::new()
        .route(paths::HEALTH, get(health::health_check))
        .route(paths::VERSION, get(health::version_info))
}

/// Create event CRUD routes
pub fn event_routes() -> Router<EventumServer> {
    Router::new()
        .route(paths::EVENTS, get(events::list_events))
        .route(paths::EVENTS, post(events::create_event))
        .route(paths::EVENT_BY_ID, get(events::get_event))
        .route(paths::EVENT_BY_ID, put(events::update_event))
        .route(paths::EVENT_BY_ID, delete(events::delete_event))
}

/// Create participant sub-resource routes
pub fn participant_routes() -> Router<EventumServer> {
    Router::new()
        .route(paths::PARTICIPANTS, get(participants::list_participants))
        .route(paths::PARTICIPANTS, post(participants::add_participant))
        .route(paths::PARTICIPANT_BY_ID, get(participants::get_participant))
        .route(
            paths::PARTICIPANT_BY_ID,
            put(participants::update_participant),
        )
        .route(
            paths::PARTICIPANT_BY_ID,
            delete(participants::delete_participant),
        )
}

/// Create report routes
pub fn report_routes() -> Router<EventumServer> {
    Router::new().route(paths::PARTICIPANTS_COUNT, get(reports::participants_count))
}

/// Create all application routes
pub fn create_routes() -> Router<EventumServer> {
    Router::new()
        .merge(health_routes())
        .merge(openapi::create_docs_routes())
        .merge(event_routes())
        .merge(participant_routes())
        .merge(report_routes())
}
