use crate::client::MongoStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use nautilus_domain::{DataKind, EqualityFilter, ReadingStore, StoreError, StoreResult};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

/// MongoDB implementation of the `ReadingStore` trait
#[derive(Clone)]
pub struct MongoReadingStore {
    store: Arc<MongoStore>,
}

impl MongoReadingStore {
    pub fn new(store: Arc<MongoStore>) -> Self {
        Self { store }
    }

    async fn routed_collection(
        &self,
        kind: DataKind,
    ) -> StoreResult<mongodb::Collection<Document>> {
        self.store
            .collection(kind.collection_name())
            .await
            .ok_or(StoreError::Unavailable)
    }
}

#[async_trait]
impl ReadingStore for MongoReadingStore {
    async fn is_connected(&self) -> bool {
        self.store.is_connected().await
    }

    #[instrument(skip(self, document), fields(collection = kind.collection_name()))]
    async fn insert_document(
        &self,
        kind: DataKind,
        document: Map<String, Value>,
    ) -> StoreResult<String> {
        let collection = self.routed_collection(kind).await?;
        let document = mongodb::bson::to_document(&document)
            .map_err(|e| StoreError::Operation(e.into()))?;

        let result = collection
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Operation(e.into()))?;

        let id = inserted_id_string(&result.inserted_id);
        debug!(database_id = %id, "document inserted");
        Ok(id)
    }

    #[instrument(skip(self, filter), fields(collection = kind.collection_name()))]
    async fn find_recent(
        &self,
        kind: DataKind,
        filter: Option<EqualityFilter>,
        limit: i64,
    ) -> StoreResult<Vec<Value>> {
        let collection = self.routed_collection(kind).await?;

        let mut query = Document::new();
        if let Some(filter) = filter {
            query.insert(filter.field, filter.value);
        }

        let cursor = collection
            .find(query)
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await
            .map_err(|e| StoreError::Operation(e.into()))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Operation(e.into()))?;

        documents.into_iter().map(document_to_json).collect()
    }

    #[instrument(skip(self), fields(collection = kind.collection_name()))]
    async fn count_documents(&self, kind: DataKind) -> StoreResult<u64> {
        let collection = self.routed_collection(kind).await?;
        collection
            .count_documents(Document::new())
            .await
            .map_err(|e| StoreError::Operation(e.into()))
    }
}

/// Store-assigned identifier as an opaque string
fn inserted_id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

/// Convert a stored document to transport JSON, stringifying the `_id` so
/// callers never see a native ObjectId
fn document_to_json(mut document: Document) -> StoreResult<Value> {
    if let Ok(oid) = document.get_object_id("_id") {
        let hex = oid.to_hex();
        document.insert("_id", hex);
    }
    serde_json::to_value(&document).map_err(|e| StoreError::Operation(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn object_ids_become_hex_strings() {
        let oid = ObjectId::new();
        assert_eq!(inserted_id_string(&Bson::ObjectId(oid)), oid.to_hex());
    }

    #[test]
    fn non_object_ids_fall_back_to_display() {
        let id = Bson::String("custom-id".to_string());
        assert_eq!(inserted_id_string(&id), "\"custom-id\"");
    }

    #[test]
    fn document_to_json_stringifies_the_id_field() {
        let oid = ObjectId::new();
        let document = doc! {
            "_id": oid,
            "sensor_id": "dht_1",
            "temperature": 18.5,
        };

        let value = document_to_json(document).unwrap();
        assert_eq!(
            value.get("_id").and_then(Value::as_str),
            Some(oid.to_hex().as_str())
        );
        assert_eq!(
            value.get("temperature").and_then(Value::as_f64),
            Some(18.5)
        );
    }

    #[test]
    fn document_to_json_leaves_other_fields_untouched() {
        let document = doc! {
            "device_id": "nav_1",
            "position": { "x": 1.0, "y": 2.0, "z": -3.0 },
        };
        let value = document_to_json(document).unwrap();
        assert_eq!(
            value.pointer("/position/y").and_then(Value::as_f64),
            Some(2.0)
        );
    }
}
