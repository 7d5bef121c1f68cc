//! In-process [`DocumentStore`] backend.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::query::{Filter, Query, Select, SortOrder};
use crate::store::{Document, DocumentStore};

#[derive(Debug, Clone)]
struct StoredItem {
    body: Value,
    etag: String,
}

/// In-memory document store.
///
/// Documents live in a partition-key -> id map behind an async lock. Every
/// write stamps a fresh ETag, so conditional replaces behave the same way
/// they would against a real document database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<String, HashMap<String, StoredItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn new_etag() -> String {
    Uuid::new_v4().to_string()
}

fn matches(body: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| match filter {
        Filter::Eq { field, value } => body.get(field) == Some(value),
        Filter::StartsWith { field, prefix } => body
            .get(field)
            .and_then(Value::as_str)
            .map_or(false, |s| s.starts_with(prefix.as_str())),
    })
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x, y) {
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            _ => x.to_string().cmp(&y.to_string()),
        },
    }
}

fn project(body: &Value, projection: &[Select]) -> Value {
    if projection.is_empty() {
        return body.clone();
    }
    let mut row = Map::new();
    for select in projection {
        match select {
            Select::Field { field, alias } => {
                row.insert(
                    alias.clone(),
                    body.get(field).cloned().unwrap_or(Value::Null),
                );
            }
            Select::ArrayLength { field, alias } => {
                let len = body.get(field).and_then(Value::as_array).map_or(0, Vec::len);
                row.insert(alias.clone(), Value::from(len));
            }
        }
    }
    Value::Object(row)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_item(
        &self,
        partition_key: &str,
        id: &str,
        body: Value,
    ) -> StoreResult<Value> {
        let mut partitions = self.partitions.write().await;
        let partition = partitions.entry(partition_key.to_owned()).or_default();
        if partition.contains_key(id) {
            return Err(StoreError::Conflict);
        }
        partition.insert(
            id.to_owned(),
            StoredItem {
                body: body.clone(),
                etag: new_etag(),
            },
        );
        Ok(body)
    }

    async fn read_item(&self, partition_key: &str, id: &str) -> StoreResult<Document> {
        let partitions = self.partitions.read().await;
        let item = partitions
            .get(partition_key)
            .and_then(|partition| partition.get(id))
            .ok_or(StoreError::NotFound)?;
        Ok(Document {
            body: item.body.clone(),
            etag: item.etag.clone(),
        })
    }

    async fn replace_item(
        &self,
        partition_key: &str,
        id: &str,
        body: Value,
        if_match: Option<&str>,
    ) -> StoreResult<Value> {
        let mut partitions = self.partitions.write().await;
        let item = partitions
            .get_mut(partition_key)
            .and_then(|partition| partition.get_mut(id))
            .ok_or(StoreError::NotFound)?;
        if let Some(expected) = if_match {
            if item.etag != expected {
                return Err(StoreError::PreconditionFailed);
            }
        }
        *item = StoredItem {
            body: body.clone(),
            etag: new_etag(),
        };
        Ok(body)
    }

    async fn delete_item(&self, partition_key: &str, id: &str) -> StoreResult<()> {
        let mut partitions = self.partitions.write().await;
        partitions
            .get_mut(partition_key)
            .and_then(|partition| partition.remove(id))
            .ok_or(StoreError::NotFound)?;
        Ok(())
    }

    async fn query_items(&self, query: &Query) -> StoreResult<Vec<Value>> {
        let partitions = self.partitions.read().await;
        let mut results: Vec<Value> = partitions
            .values()
            .flat_map(HashMap::values)
            .filter(|item| matches(&item.body, &query.filters))
            .map(|item| item.body.clone())
            .collect();

        if let Some(order) = &query.order_by {
            results.sort_by(|a, b| {
                let ordering = compare_field(a, b, &order.field);
                match order.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        Ok(results
            .iter()
            .map(|body| project(body, &query.projection))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, location: &str, date: &str) -> Value {
        json!({ "id": id, "location": location, "date": date })
    }

    #[tokio::test]
    async fn create_then_read_roundtrips() {
        let store = MemoryStore::new();
        let body = doc("e1", "Madrid", "2024-09-15T09:00:00Z");
        store.create_item("e1", "e1", body.clone()).await.unwrap();

        let stored = store.read_item("e1", "e1").await.unwrap();
        assert_eq!(stored.body, body);
        assert!(!stored.etag.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store.create_item("e1", "e1", doc("e1", "a", "b")).await.unwrap();
        let err = store
            .create_item("e1", "e1", doc("e1", "a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.read_item("nope", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn conditional_replace_rejects_stale_etag() {
        let store = MemoryStore::new();
        store.create_item("e1", "e1", doc("e1", "a", "b")).await.unwrap();
        let first = store.read_item("e1", "e1").await.unwrap();

        // A second writer replaces the document, invalidating the first ETag.
        store
            .replace_item("e1", "e1", doc("e1", "c", "d"), Some(&first.etag))
            .await
            .unwrap();
        let err = store
            .replace_item("e1", "e1", doc("e1", "x", "y"), Some(&first.etag))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PreconditionFailed));
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let store = MemoryStore::new();
        store.create_item("e1", "e1", doc("e1", "a", "b")).await.unwrap();
        store.delete_item("e1", "e1").await.unwrap();
        let err = store.read_item("e1", "e1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn query_filters_across_partitions() {
        let store = MemoryStore::new();
        store
            .create_item("e1", "e1", doc("e1", "Madrid", "2024-09-15T09:00:00Z"))
            .await
            .unwrap();
        store
            .create_item("e2", "e2", doc("e2", "Lisboa", "2024-09-15T18:00:00Z"))
            .await
            .unwrap();
        store
            .create_item("e3", "e3", doc("e3", "Madrid", "2024-10-01T09:00:00Z"))
            .await
            .unwrap();

        let query = Query::new()
            .filter_eq("location", "Madrid")
            .filter_starts_with("date", "2024-09-15");
        let results = store.query_items(&query).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["id"], "e1");
    }

    #[tokio::test]
    async fn query_orders_by_string_field() {
        let store = MemoryStore::new();
        for (id, date) in [("a", "2024-03-01"), ("b", "2024-01-01"), ("c", "2024-02-01")] {
            store
                .create_item(id, id, doc(id, "x", date))
                .await
                .unwrap();
        }

        let query = Query::new().order_by("date", SortOrder::Desc);
        let results = store.query_items(&query).await.unwrap();
        let ids: Vec<&str> = results.iter().filter_map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn projection_reports_array_lengths() {
        let store = MemoryStore::new();
        store
            .create_item(
                "e1",
                "e1",
                json!({ "id": "e1", "name": "Conf", "participants": [1, 2, 3] }),
            )
            .await
            .unwrap();
        store
            .create_item("e2", "e2", json!({ "id": "e2", "name": "Meetup" }))
            .await
            .unwrap();

        let query = Query::new()
            .select_field("id", "event_id")
            .select_field("name", "name")
            .select_array_length("participants", "participants_count");
        let mut rows = store.query_items(&query).await.unwrap();
        rows.sort_by_key(|row| row["event_id"].as_str().unwrap_or_default().to_owned());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["event_id"], "e1");
        assert_eq!(rows[0]["participants_count"], 3);
        assert_eq!(rows[1]["participants_count"], 0);
    }
}
