use crate::error::StoreResult;
use crate::kind::DataKind;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Equality filter applied to a query (e.g. `sensor_id = "dht_1"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    pub field: &'static str,
    pub value: String,
}

/// Storage trait for telemetry documents.
/// Infrastructure layer (nautilus-mongo) implements this trait.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Whether a live store connection currently exists
    async fn is_connected(&self) -> bool;

    /// Insert one document into the collection routed for `kind`, returning
    /// the store-assigned identifier as a string
    async fn insert_document(
        &self,
        kind: DataKind,
        document: Map<String, Value>,
    ) -> StoreResult<String>;

    /// Matching documents for `kind`, ordered by timestamp descending and
    /// truncated to `limit`, with store identifiers already stringified
    async fn find_recent(
        &self,
        kind: DataKind,
        filter: Option<EqualityFilter>,
        limit: i64,
    ) -> StoreResult<Vec<Value>>;

    /// Total document count in the collection routed for `kind`
    async fn count_documents(&self, kind: DataKind) -> StoreResult<u64>;
}
