//! Participant sub-resource manager.
//!
//! Participants are an array embedded in the owning event document. Every
//! mutation reads the whole event, rewrites the array in memory and writes
//! the whole document back, replaying the ETag from the read so a
//! concurrent writer fails the request instead of being overwritten.

use std::sync::Arc;

use document_store::{DocumentStore, SortOrder};
use tracing::info;

use crate::error::ApiError;
use crate::models::{Event, NewParticipant, Participant, ParticipantPatch};
use crate::services::read_event;
use crate::validation::validate_payload;

/// Sort keys accepted by the participant list operation. Anything else is
/// silently ignored.
const PARTICIPANT_SORT_KEYS: [&str; 2] = ["name", "registration_date"];

#[derive(Clone)]
pub struct ParticipantService {
    store: Arc<dyn DocumentStore>,
}

impl ParticipantService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Enroll a participant at the end of the event's list.
    ///
    /// Capacity is checked before uniqueness, matching the order of the
    /// enrollment rules: a full event rejects even an already-enrolled id
    /// with the capacity error.
    pub async fn add(
        &self,
        event_id: &str,
        registration: NewParticipant,
    ) -> Result<Participant, ApiError> {
        validate_payload(&registration)?;
        let (mut event, etag) = read_event(self.store.as_ref(), event_id).await?;
        if event.participants.len() >= event.capacity as usize {
            return Err(ApiError::capacity_exceeded());
        }
        if event
            .participants
            .iter()
            .any(|participant| participant.id == registration.id)
        {
            return Err(ApiError::duplicate_participant());
        }

        let participant = registration.into_participant();
        event.participants.push(participant.clone());
        self.write_back(&event, &etag).await?;
        info!(event_id, participant_id = %participant.id, "participant enrolled");
        Ok(participant)
    }

    /// Look up a participant by id within the event's list.
    pub async fn get(
        &self,
        event_id: &str,
        participant_id: &str,
    ) -> Result<Participant, ApiError> {
        let (event, _) = read_event(self.store.as_ref(), event_id).await?;
        event
            .participants
            .into_iter()
            .find(|participant| participant.id == participant_id)
            .ok_or_else(ApiError::participant_not_found)
    }

    /// List the event's participants with optional substring filters and a
    /// stable in-memory sort over the filtered list.
    pub async fn list(
        &self,
        event_id: &str,
        name: Option<&str>,
        email: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<Participant>, ApiError> {
        let (event, _) = read_event(self.store.as_ref(), event_id).await?;
        let mut participants = event.participants;

        if let Some(name) = name {
            let needle = name.to_lowercase();
            participants.retain(|participant| participant.name.to_lowercase().contains(&needle));
        }
        if let Some(email) = email {
            let needle = email.to_lowercase();
            participants.retain(|participant| participant.email.to_lowercase().contains(&needle));
        }
        if let Some(sort_by) = sort_by {
            if PARTICIPANT_SORT_KEYS.contains(&sort_by) {
                let direction = order.map(SortOrder::parse).unwrap_or_default();
                // Stable sort: equal keys keep registration order.
                participants.sort_by(|a, b| {
                    let ordering = if sort_by == "name" {
                        a.name.cmp(&b.name)
                    } else {
                        a.registration_date.cmp(&b.registration_date)
                    };
                    match direction {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    }
                });
            }
        }

        Ok(participants)
    }

    /// Merge a partial update onto an enrolled participant, keeping its
    /// position in the list.
    ///
    /// A changed id is accepted as-is and is not re-checked against the
    /// other enrolled participants.
    pub async fn update(
        &self,
        event_id: &str,
        participant_id: &str,
        patch: ParticipantPatch,
    ) -> Result<Participant, ApiError> {
        validate_payload(&patch)?;
        let (mut event, etag) = read_event(self.store.as_ref(), event_id).await?;
        let updated = {
            let slot = event
                .participants
                .iter_mut()
                .find(|participant| participant.id == participant_id)
                .ok_or_else(ApiError::participant_not_found)?;
            patch.apply_to(slot);
            slot.clone()
        };

        self.write_back(&event, &etag).await?;
        info!(event_id, participant_id, "participant updated");
        Ok(updated)
    }

    /// Remove a participant from the event, preserving the relative order
    /// of the remaining entries.
    pub async fn remove(&self, event_id: &str, participant_id: &str) -> Result<(), ApiError> {
        let (mut event, etag) = read_event(self.store.as_ref(), event_id).await?;
        let before = event.participants.len();
        event
            .participants
            .retain(|participant| participant.id != participant_id);
        if event.participants.len() == before {
            return Err(ApiError::participant_not_found());
        }

        self.write_back(&event, &etag).await?;
        info!(event_id, participant_id, "participant removed");
        Ok(())
    }

    async fn write_back(&self, event: &Event, etag: &str) -> Result<(), ApiError> {
        let body = serde_json::to_value(event).map_err(|err| ApiError::store(err.to_string()))?;
        self.store
            .replace_item(&event.id, &event.id, body, Some(etag))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::services::EventService;
    use document_store::MemoryStore;

    fn services() -> (EventService, ParticipantService) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        (
            EventService::new(Arc::clone(&store)),
            ParticipantService::new(store),
        )
    }

    async fn seed_event(events: &EventService, id: &str, capacity: u32) {
        events
            .create(Event {
                id: id.to_string(),
                name: format!("Event {id}"),
                description: None,
                date: "2024-09-15T09:00:00Z".to_string(),
                location: "Madrid".to_string(),
                capacity,
                participants: Vec::new(),
            })
            .await
            .unwrap();
    }

    fn registration(id: &str, name: &str, email: &str, date: &str) -> NewParticipant {
        NewParticipant {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            registration_date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn add_appends_in_registration_order() {
        let (events, participants) = services();
        seed_event(&events, "e1", 5).await;

        for id in ["p1", "p2", "p3"] {
            participants
                .add(
                    "e1",
                    registration(id, id, &format!("{id}@example.com"), "2024-01-01T00:00:00Z"),
                )
                .await
                .unwrap();
        }

        let stored = events.get("e1").await.unwrap();
        let ids: Vec<&str> = stored.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn add_rejects_when_at_capacity() {
        let (events, participants) = services();
        seed_event(&events, "e1", 2).await;

        for id in ["p1", "p2"] {
            participants
                .add(
                    "e1",
                    registration(id, id, &format!("{id}@example.com"), "2024-01-01T00:00:00Z"),
                )
                .await
                .unwrap();
        }
        let err = participants
            .add(
                "e1",
                registration("p3", "p3", "p3@example.com", "2024-01-01T00:00:00Z"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::CapacityExceeded);
        assert_eq!(events.get("e1").await.unwrap().participants.len(), 2);
    }

    #[tokio::test]
    async fn add_rejects_duplicate_id_under_capacity() {
        let (events, participants) = services();
        seed_event(&events, "e1", 5).await;

        participants
            .add(
                "e1",
                registration("p1", "Ana", "ana@example.com", "2024-01-01T00:00:00Z"),
            )
            .await
            .unwrap();
        let err = participants
            .add(
                "e1",
                registration("p1", "Otra Ana", "otra@example.com", "2024-01-02T00:00:00Z"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::DuplicateParticipant);
        assert_eq!(events.get("e1").await.unwrap().participants.len(), 1);
    }

    #[tokio::test]
    async fn add_to_missing_event_is_event_not_found() {
        let (_, participants) = services();
        let err = participants
            .add(
                "ghost",
                registration("p1", "Ana", "ana@example.com", "2024-01-01T00:00:00Z"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::EventNotFound);
    }

    #[tokio::test]
    async fn get_distinguishes_participant_not_found() {
        let (events, participants) = services();
        seed_event(&events, "e1", 5).await;
        let err = participants.get("e1", "ghost").await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::ParticipantNotFound);
    }

    #[tokio::test]
    async fn list_filters_combine_with_and() {
        let (events, participants) = services();
        seed_event(&events, "e1", 10).await;

        participants
            .add(
                "e1",
                registration("p1", "Jordi", "jordi@example.com", "2024-01-01T00:00:00Z"),
            )
            .await
            .unwrap();
        participants
            .add(
                "e1",
                registration("p2", "Joana", "joana@other.org", "2024-01-02T00:00:00Z"),
            )
            .await
            .unwrap();
        participants
            .add(
                "e1",
                registration("p3", "Pere", "pere@example.com", "2024-01-03T00:00:00Z"),
            )
            .await
            .unwrap();

        let filtered = participants
            .list("e1", Some("jo"), Some("example.com"), None, None)
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p1");
    }

    #[tokio::test]
    async fn list_sorts_by_registration_date_descending() {
        let (events, participants) = services();
        seed_event(&events, "e1", 10).await;

        participants
            .add(
                "e1",
                registration("p1", "Ana", "ana@example.com", "2024-01-01T00:00:00Z"),
            )
            .await
            .unwrap();
        participants
            .add(
                "e1",
                registration("p2", "Bea", "bea@example.com", "2024-02-01T00:00:00Z"),
            )
            .await
            .unwrap();

        let sorted = participants
            .list("e1", None, None, Some("registration_date"), Some("desc"))
            .await
            .unwrap();
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn update_keeps_list_position() {
        let (events, participants) = services();
        seed_event(&events, "e1", 10).await;

        for id in ["p1", "p2", "p3"] {
            participants
                .add(
                    "e1",
                    registration(id, id, &format!("{id}@example.com"), "2024-01-01T00:00:00Z"),
                )
                .await
                .unwrap();
        }

        let updated = participants
            .update(
                "e1",
                "p2",
                ParticipantPatch {
                    name: Some("Renamed".to_string()),
                    ..ParticipantPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");

        let stored = events.get("e1").await.unwrap();
        let ids: Vec<&str> = stored.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(stored.participants[1].name, "Renamed");
    }

    #[tokio::test]
    async fn update_allows_id_change_without_uniqueness_check() {
        let (events, participants) = services();
        seed_event(&events, "e1", 10).await;

        for id in ["p1", "p2"] {
            participants
                .add(
                    "e1",
                    registration(id, id, &format!("{id}@example.com"), "2024-01-01T00:00:00Z"),
                )
                .await
                .unwrap();
        }

        // The id can collide with a sibling; no re-validation happens.
        let updated = participants
            .update(
                "e1",
                "p2",
                ParticipantPatch {
                    id: Some("p1".to_string()),
                    ..ParticipantPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, "p1");

        let stored = events.get("e1").await.unwrap();
        let ids: Vec<&str> = stored.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p1"]);
    }

    #[tokio::test]
    async fn remove_preserves_relative_order() {
        let (events, participants) = services();
        seed_event(&events, "e1", 10).await;

        for id in ["p1", "p2", "p3"] {
            participants
                .add(
                    "e1",
                    registration(id, id, &format!("{id}@example.com"), "2024-01-01T00:00:00Z"),
                )
                .await
                .unwrap();
        }

        participants.remove("e1", "p2").await.unwrap();
        let stored = events.get("e1").await.unwrap();
        let ids: Vec<&str> = stored.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[tokio::test]
    async fn remove_missing_participant_is_not_found() {
        let (events, participants) = services();
        seed_event(&events, "e1", 10).await;
        let err = participants.remove("e1", "ghost").await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::ParticipantNotFound);
    }
}
