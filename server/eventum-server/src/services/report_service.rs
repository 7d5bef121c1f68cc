//! Aggregate reporting over the event collection.

use std::sync::Arc;

use document_store::{DocumentStore, Query};

use crate::error::ApiError;
use crate::models::ParticipantsCountRow;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn DocumentStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Per-event participant counts, one row per event.
    ///
    /// The counting happens in the store's query layer through an
    /// array-length projection; full documents are never materialized here.
    pub async fn participants_count(&self) -> Result<Vec<ParticipantsCountRow>, ApiError> {
        let query = Query::new()
            .select_field("id", "event_id")
            .select_field("name", "name")
            .select_array_length("participants", "participants_count");

        let rows = self.store.query_items(&query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(|err| ApiError::store(err.to_string())))
            .collect()
    }
}
