use axum::{extract::State, Json};

use crate::{error::ApiError, models::ParticipantsCountRow, server::EventumServer};

/// Participant counts per event
#[utoipa::path(
    get,
    path = "/reports/participants-count/",
    responses(
        (status = 200, description = "Counts retrieved", body = Vec<ParticipantsCountRow>)
    ),
    tag = "reports"
)]
pub async fn participants_count(
    State(server): State<EventumServer>,
) -> Result<Json<Vec<ParticipantsCountRow>>, ApiError> {
    let rows = server.reports.participants_count().await?;
    Ok(Json(rows))
}
