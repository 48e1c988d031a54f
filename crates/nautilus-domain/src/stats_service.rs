use crate::error::{DomainError, DomainResult};
use crate::kind::DataKind;
use crate::store::ReadingStore;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Document count for one collection, degrading to a literal marker when the
/// individual count cannot be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionCount {
    Available(u64),
    Unavailable,
}

impl Serialize for CollectionCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CollectionCount::Available(count) => serializer.serialize_u64(*count),
            CollectionCount::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

/// Per-collection document counts across every known data kind.
///
/// A single failing count degrades to `Unavailable` for that collection only;
/// the aggregate succeeds as a whole unless the store is globally
/// disconnected.
pub struct StatsService {
    store: Arc<dyn ReadingStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn collection_counts(
        &self,
    ) -> DomainResult<BTreeMap<&'static str, CollectionCount>> {
        if !self.store.is_connected().await {
            return Err(DomainError::StoreUnavailable);
        }

        let mut counts = BTreeMap::new();
        for kind in DataKind::ALL {
            let entry = match self.store.count_documents(kind).await {
                Ok(count) => CollectionCount::Available(count),
                Err(e) => {
                    warn!(
                        collection = kind.collection_name(),
                        error = %e,
                        "count failed, reporting collection as unavailable"
                    );
                    CollectionCount::Unavailable
                }
            };
            counts.insert(kind.stats_key(), entry);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MockReadingStore;

    #[tokio::test]
    async fn test_counts_cover_every_known_collection() {
        let mut mock_store = MockReadingStore::new();
        mock_store.expect_is_connected().return_once(|| true);
        mock_store
            .expect_count_documents()
            .times(DataKind::ALL.len())
            .returning(|_| Ok(7));

        let service = StatsService::new(Arc::new(mock_store));
        let counts = service.collection_counts().await.unwrap();

        assert_eq!(counts.len(), DataKind::ALL.len());
        assert!(counts
            .values()
            .all(|c| *c == CollectionCount::Available(7)));
    }

    #[tokio::test]
    async fn test_single_count_failure_degrades_that_collection_only() {
        let mut mock_store = MockReadingStore::new();
        mock_store.expect_is_connected().return_once(|| true);
        mock_store.expect_count_documents().returning(|kind| {
            if kind == DataKind::Mapping {
                Err(StoreError::Operation(anyhow::anyhow!("collection locked")))
            } else {
                Ok(3)
            }
        });

        let service = StatsService::new(Arc::new(mock_store));
        let counts = service.collection_counts().await.unwrap();

        assert_eq!(counts.len(), DataKind::ALL.len());
        assert_eq!(counts.get("mapping"), Some(&CollectionCount::Unavailable));
        assert_eq!(
            counts.get("navigation"),
            Some(&CollectionCount::Available(3))
        );
    }

    #[tokio::test]
    async fn test_disconnected_store_fails_the_whole_operation() {
        let mut mock_store = MockReadingStore::new();
        mock_store.expect_is_connected().return_once(|| false);
        mock_store.expect_count_documents().times(0);

        let service = StatsService::new(Arc::new(mock_store));
        let result = service.collection_counts().await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable)));
    }

    #[test]
    fn test_collection_count_serializes_to_number_or_marker() {
        assert_eq!(
            serde_json::to_value(CollectionCount::Available(12)).unwrap(),
            serde_json::json!(12)
        );
        assert_eq!(
            serde_json::to_value(CollectionCount::Unavailable).unwrap(),
            serde_json::json!("unavailable")
        );
    }
}
