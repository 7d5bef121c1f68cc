//! Document database abstraction for Eventum Engine
//!
//! This crate defines the contract the HTTP server programs against: point
//! create/read/replace/delete of JSON documents addressed by id plus
//! partition key, and a typed query operation that runs across all
//! partitions. Documents carry ETags so callers can perform conditional
//! replaces instead of blind last-writer-wins overwrites.
//!
//! [`MemoryStore`] is the bundled backend: an in-process, partitioned map
//! that evaluates the full query model locally. It backs the default binary
//! and the test suite; a networked document database can be swapped in by
//! implementing [`DocumentStore`].

pub mod error;
pub mod memory;
pub mod query;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use query::{Filter, OrderBy, Query, Select, SortOrder};
pub use store::{Document, DocumentStore};
