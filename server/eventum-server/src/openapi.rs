use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::EventumServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,

        // Event endpoints
        crate::handlers::events::create_event,
        crate::handlers::events::get_event,
        crate::handlers::events::list_events,
        crate::handlers::events::update_event,
        crate::handlers::events::delete_event,

        // Participant endpoints
        crate::handlers::participants::add_participant,
        crate::handlers::participants::get_participant,
        crate::handlers::participants::list_participants,
        crate::handlers::participants::update_participant,
        crate::handlers::participants::delete_participant,

        // Report endpoints
        crate::handlers::reports::participants_count,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,
            crate::models::Event,
            crate::models::EventPatch,
            crate::models::Participant,
            crate::models::NewParticipant,
            crate::models::ParticipantPatch,
            crate::models::ParticipantsCountRow,
        )
    ),
    tags(
        (name = "health", description = "System health and status endpoints"),
        (name = "events", description = "Event management"),
        (name = "participants", description = "Participant enrollment within an event"),
        (name = "reports", description = "Aggregate reporting"),
    ),
    info(
        title = "Eventum Engine API",
        version = "1.0.0",
        description = "Event and participant management API backed by a document store.",
        contact(
            name = "Eventum Team",
            email = "api@eventum.dev"
        ),
    )
)]
pub struct ApiDoc;

/// Create API documentation routes (Swagger UI + raw OpenAPI JSON)
pub fn create_docs_routes() -> Router<EventumServer> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
