//! Domain services behind the HTTP handlers.
//!
//! Each service owns a handle to the document store and returns
//! [`ApiError`](crate::error::ApiError) so the handlers stay thin.

mod event_service;
mod participant_service;
mod report_service;

pub use event_service::EventService;
pub use participant_service::ParticipantService;
pub use report_service::ReportService;

use document_store::{DocumentStore, StoreError};

use crate::error::ApiError;
use crate::models::Event;

/// Resolve an event document by id, returning the parsed event together
/// with the ETag of the read revision.
pub(crate) async fn read_event(
    store: &dyn DocumentStore,
    event_id: &str,
) -> Result<(Event, String), ApiError> {
    let document = store
        .read_item(event_id, event_id)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => ApiError::event_not_found(),
            other => ApiError::from(other),
        })?;
    let event = serde_json::from_value(document.body)
        .map_err(|err| ApiError::store(err.to_string()))?;
    Ok((event, document.etag))
}
