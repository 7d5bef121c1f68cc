pub mod events;
pub mod health;
pub mod participants;
pub mod reports;
