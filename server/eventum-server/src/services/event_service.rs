//! Event repository facade over the document store.

use std::sync::Arc;

use document_store::{DocumentStore, Query, SortOrder};
use tracing::info;

use crate::error::ApiError;
use crate::models::{Event, EventPatch};
use crate::services::read_event;
use crate::validation::{parse_date_filter, validate_payload};

/// Sort keys accepted by the event list operation. Anything else is
/// silently ignored and the list comes back unsorted.
const EVENT_SORT_KEYS: [&str; 2] = ["date", "name"];

/// Translates event CRUD onto the document store. The event id doubles as
/// the partition key, so point operations stay single-partition while the
/// list query scans the whole collection.
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn DocumentStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new event document and return it unchanged.
    pub async fn create(&self, event: Event) -> Result<Event, ApiError> {
        validate_payload(&event)?;
        let body = serde_json::to_value(&event).map_err(|err| ApiError::store(err.to_string()))?;
        self.store.create_item(&event.id, &event.id, body).await?;
        info!(event_id = %event.id, "event created");
        Ok(event)
    }

    /// Fetch a stored event by id.
    pub async fn get(&self, event_id: &str) -> Result<Event, ApiError> {
        let (event, _) = read_event(self.store.as_ref(), event_id).await?;
        Ok(event)
    }

    /// Query events with optional filters; sorting is delegated to the
    /// store's query layer, never done here.
    pub async fn list(
        &self,
        date: Option<&str>,
        location: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<Event>, ApiError> {
        let mut query = Query::new();
        if let Some(date) = date {
            let prefix = parse_date_filter(date)?;
            query = query.filter_starts_with("date", prefix);
        }
        if let Some(location) = location {
            query = query.filter_eq("location", location);
        }
        if let Some(sort_by) = sort_by {
            if EVENT_SORT_KEYS.contains(&sort_by) {
                let direction = order.map(SortOrder::parse).unwrap_or_default();
                query = query.order_by(sort_by, direction);
            }
        }

        let rows = self.store.query_items(&query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(|err| ApiError::store(err.to_string())))
            .collect()
    }

    /// Merge a partial update onto a stored event.
    ///
    /// The capacity invariant is re-checked after the merge; a violating
    /// patch is rejected without touching the stored document.
    pub async fn update(&self, event_id: &str, patch: EventPatch) -> Result<Event, ApiError> {
        validate_payload(&patch)?;
        let (mut event, etag) = read_event(self.store.as_ref(), event_id).await?;
        patch.apply_to(&mut event);
        if event.participants.len() > event.capacity as usize {
            return Err(ApiError::invalid_state(
                "Capacity cannot be lower than the number of enrolled participants.",
            ));
        }

        let body = serde_json::to_value(&event).map_err(|err| ApiError::store(err.to_string()))?;
        self.store
            .replace_item(event_id, event_id, body, Some(&etag))
            .await?;
        info!(event_id, "event updated");
        Ok(event)
    }

    /// Delete an event and, implicitly, all of its participants.
    pub async fn delete(&self, event_id: &str) -> Result<(), ApiError> {
        self.store.delete_item(event_id, event_id).await?;
        info!(event_id, "event deleted");
        Ok(())
    }
}
