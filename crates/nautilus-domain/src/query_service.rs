use crate::error::{DomainError, DomainResult, StoreError};
use crate::kind::DataKind;
use crate::store::{EqualityFilter, ReadingStore};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Parameters for one retrieval request
#[derive(Debug, Clone)]
pub struct QueryInput {
    pub kind: DataKind,
    /// Value for the kind's identifying field (`sensor_id` / `device_id`)
    pub filter_value: Option<String>,
    pub limit: i64,
}

/// Filtered, time-descending, limited reads per data kind.
///
/// Store identifiers arrive already stringified from the store layer; no
/// other field is transformed.
pub struct QueryService {
    store: Arc<dyn ReadingStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, input), fields(kind = input.kind.stats_key(), limit = input.limit))]
    pub async fn recent(&self, input: QueryInput) -> DomainResult<Vec<Value>> {
        if input.limit < 1 {
            return Err(DomainError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        let filter = match (input.kind.filter_field(), input.filter_value) {
            (Some(field), Some(value)) => Some(EqualityFilter { field, value }),
            _ => None,
        };

        match self.store.find_recent(input.kind, filter, input.limit).await {
            Ok(documents) => {
                debug!(count = documents.len(), "query returned documents");
                Ok(documents)
            }
            Err(StoreError::Unavailable) => Err(DomainError::StoreUnavailable),
            Err(StoreError::Operation(e)) => {
                // Detail stays in the logs; the caller sees a generic failure
                error!(error = %e, "query failed");
                Err(DomainError::QueryFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockReadingStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_recent_forwards_filter_and_limit() {
        let mut mock_store = MockReadingStore::new();
        mock_store
            .expect_find_recent()
            .withf(|kind, filter, limit| {
                *kind == DataKind::Navigation
                    && *filter
                        == Some(EqualityFilter {
                            field: "device_id",
                            value: "x".to_string(),
                        })
                    && *limit == 2
            })
            .times(1)
            .return_once(|_, _, _| {
                Ok(vec![
                    json!({"_id": "a", "device_id": "x"}),
                    json!({"_id": "b", "device_id": "x"}),
                ])
            });

        let service = QueryService::new(Arc::new(mock_store));
        let documents = service
            .recent(QueryInput {
                kind: DataKind::Navigation,
                filter_value: Some("x".to_string()),
                limit: 2,
            })
            .await
            .unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].get("_id"), Some(&json!("a")));
    }

    #[tokio::test]
    async fn test_recent_without_filter_queries_everything() {
        let mut mock_store = MockReadingStore::new();
        mock_store
            .expect_find_recent()
            .withf(|_, filter, _| filter.is_none())
            .times(1)
            .return_once(|_, _, _| Ok(vec![]));

        let service = QueryService::new(Arc::new(mock_store));
        let documents = service
            .recent(QueryInput {
                kind: DataKind::Environmental,
                filter_value: None,
                limit: 10,
            })
            .await
            .unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_recent_rejects_non_positive_limit() {
        let mut mock_store = MockReadingStore::new();
        mock_store.expect_find_recent().times(0);

        let service = QueryService::new(Arc::new(mock_store));
        let result = service
            .recent(QueryInput {
                kind: DataKind::Mapping,
                filter_value: None,
                limit: 0,
            })
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_recent_maps_unavailable_store() {
        let mut mock_store = MockReadingStore::new();
        mock_store
            .expect_find_recent()
            .times(1)
            .return_once(|_, _, _| Err(StoreError::Unavailable));

        let service = QueryService::new(Arc::new(mock_store));
        let result = service
            .recent(QueryInput {
                kind: DataKind::Environmental,
                filter_value: None,
                limit: 5,
            })
            .await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable)));
    }

    #[tokio::test]
    async fn test_recent_hides_store_error_detail() {
        let mut mock_store = MockReadingStore::new();
        mock_store
            .expect_find_recent()
            .times(1)
            .return_once(|_, _, _| {
                Err(StoreError::Operation(anyhow::anyhow!("cursor timed out")))
            });

        let service = QueryService::new(Arc::new(mock_store));
        let result = service
            .recent(QueryInput {
                kind: DataKind::Environmental,
                filter_value: None,
                limit: 5,
            })
            .await;
        assert!(matches!(result, Err(DomainError::QueryFailed)));
    }
}
