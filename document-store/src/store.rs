use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;
use crate::query::Query;

/// A stored JSON document together with the ETag of its current revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub body: Value,
    pub etag: String,
}

/// Contract of the external document database.
///
/// Point operations address a single document by id plus partition key.
/// `query_items` evaluates a [`Query`] across all partitions. The ETag
/// returned from `read_item` can be replayed into `replace_item` to reject
/// a write when the document changed in between.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document. Fails with [`crate::StoreError::Conflict`]
    /// when the id is already taken within the partition.
    async fn create_item(
        &self,
        partition_key: &str,
        id: &str,
        body: Value,
    ) -> StoreResult<Value>;

    /// Point-read a document by id.
    async fn read_item(&self, partition_key: &str, id: &str) -> StoreResult<Document>;

    /// Replace a document wholesale. When `if_match` is set, the replace
    /// only succeeds while the stored ETag still matches.
    async fn replace_item(
        &self,
        partition_key: &str,
        id: &str,
        body: Value,
        if_match: Option<&str>,
    ) -> StoreResult<Value>;

    /// Delete a document by id.
    async fn delete_item(&self, partition_key: &str, id: &str) -> StoreResult<()>;

    /// Run a query across the whole collection.
    async fn query_items(&self, query: &Query) -> StoreResult<Vec<Value>>;
}
