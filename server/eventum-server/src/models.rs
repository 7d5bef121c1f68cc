//! Domain models for events and their enrolled participants.
//!
//! Partial updates are explicit patch types with one `Option` per mutable
//! field; only the supplied fields are merged onto the stored document.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A participant enrolled in an event.
///
/// Participants exist only inside their parent event document; the id is
/// unique within that event's list, not globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Participant {
    #[schema(example = "p1")]
    pub id: String,
    #[validate(length(min = 1, message = "Participant name is required"))]
    #[schema(example = "Juan Perez")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "juan.perez@example.com")]
    pub email: String,
    #[schema(example = "2024-09-01T12:00:00Z")]
    pub registration_date: String,
}

/// Registration payload for the add-participant operation.
///
/// `registration_date` may be omitted and is stamped with the current UTC
/// time on enrollment.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewParticipant {
    #[schema(example = "p1")]
    pub id: String,
    #[validate(length(min = 1, message = "Participant name is required"))]
    #[schema(example = "Juan Perez")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "juan.perez@example.com")]
    pub email: String,
    pub registration_date: Option<String>,
}

impl NewParticipant {
    /// Resolve into a stored participant, stamping the registration time
    /// when the caller did not supply one.
    pub fn into_participant(self) -> Participant {
        let registration_date = self
            .registration_date
            .unwrap_or_else(|| Utc::now().to_rfc3339());
        Participant {
            id: self.id,
            name: self.name,
            email: self.email,
            registration_date,
        }
    }
}

/// An event document.
///
/// `id` doubles as the partition key and is immutable after creation.
/// `date` is stored as an opaque string; it is only parsed when used as a
/// list filter. Invariant after every mutation:
/// `capacity >= participants.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Event {
    #[schema(example = "e1")]
    pub id: String,
    #[validate(length(min = 1, message = "Event name is required"))]
    #[schema(example = "Conferencia Tech 2024")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "2024-09-15T09:00:00Z")]
    pub date: String,
    #[validate(length(min = 1, message = "Event location is required"))]
    #[schema(example = "Centro de Convenciones")]
    pub location: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    #[schema(example = 300)]
    pub capacity: u32,
    #[serde(default)]
    #[validate(nested)]
    pub participants: Vec<Participant>,
}

/// Partial event update; only supplied fields are merged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct EventPatch {
    #[validate(length(min = 1, message = "Event name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[validate(length(min = 1, message = "Event location is required"))]
    pub location: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<u32>,
    #[validate(nested)]
    pub participants: Option<Vec<Participant>>,
}

impl EventPatch {
    /// Merge the supplied fields onto an existing event. The id is not a
    /// patch field and never changes.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(name) = self.name {
            event.name = name;
        }
        if let Some(description) = self.description {
            event.description = Some(description);
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(participants) = self.participants {
            event.participants = participants;
        }
    }
}

/// Partial participant update; only supplied fields are merged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ParticipantPatch {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Participant name is required"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub registration_date: Option<String>,
}

impl ParticipantPatch {
    /// Merge the supplied fields onto an enrolled participant in place.
    pub fn apply_to(self, participant: &mut Participant) {
        if let Some(id) = self.id {
            participant.id = id;
        }
        if let Some(name) = self.name {
            participant.name = name;
        }
        if let Some(email) = self.email {
            participant.email = email;
        }
        if let Some(registration_date) = self.registration_date {
            participant.registration_date = registration_date;
        }
    }
}

/// One row of the participants-count report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantsCountRow {
    #[schema(example = "e1")]
    pub event_id: String,
    #[schema(example = "Conferencia Tech 2024")]
    pub name: String,
    #[schema(example = 42)]
    pub participants_count: u64,
}
