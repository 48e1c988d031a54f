//! Integration tests against a live MongoDB instance.
//!
//! Run with a local MongoDB (default `mongodb://localhost:27017`, override
//! with `NAUTILUS_TEST_MONGODB_URL`) and:
//!
//! ```sh
//! cargo test -p nautilus-mongo --features integration-tests
//! ```

use chrono::Utc;
use nautilus_mongo::{MongoConfig, MongoReadingStore, MongoStore};
use nautilus_domain::{DataKind, EqualityFilter, ReadingStore};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn test_config() -> MongoConfig {
    MongoConfig {
        url: std::env::var("NAUTILUS_TEST_MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        database: format!("nautilus_test_{}", Utc::now().timestamp_millis()),
        connect_timeout_secs: 5,
    }
}

fn reading_document(sensor_id: &str, timestamp: &str) -> Map<String, Value> {
    let mut document = Map::new();
    document.insert("sensor_id".to_string(), json!(sensor_id));
    document.insert("temperature".to_string(), json!(18.5));
    document.insert("humidity".to_string(), json!(85.3));
    document.insert("timestamp".to_string(), json!(timestamp));
    document
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn insert_find_and_count_round_trip() {
    let store = Arc::new(MongoStore::new(test_config()));
    assert!(store.connect().await, "MongoDB must be reachable");
    let repository = MongoReadingStore::new(store.clone());

    let before = repository
        .count_documents(DataKind::Environmental)
        .await
        .unwrap();

    let id = repository
        .insert_document(
            DataKind::Environmental,
            reading_document("dht_it", "2025-06-01T12:00:00Z"),
        )
        .await
        .unwrap();
    assert!(!id.is_empty());

    let after = repository
        .count_documents(DataKind::Environmental)
        .await
        .unwrap();
    assert_eq!(after, before + 1);

    let documents = repository
        .find_recent(
            DataKind::Environmental,
            Some(EqualityFilter {
                field: "sensor_id",
                value: "dht_it".to_string(),
            }),
            10,
        )
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(
        documents[0].get("_id").and_then(Value::as_str),
        Some(id.as_str())
    );

    store.close().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn find_recent_orders_by_timestamp_descending_and_limits() {
    let store = Arc::new(MongoStore::new(test_config()));
    assert!(store.connect().await, "MongoDB must be reachable");
    let repository = MongoReadingStore::new(store.clone());

    for hour in 8..13 {
        repository
            .insert_document(
                DataKind::Environmental,
                reading_document("dht_order", &format!("2025-06-01T{hour:02}:00:00Z")),
            )
            .await
            .unwrap();
    }

    let documents = repository
        .find_recent(
            DataKind::Environmental,
            Some(EqualityFilter {
                field: "sensor_id",
                value: "dht_order".to_string(),
            }),
            2,
        )
        .await
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(
        documents[0].get("timestamp").and_then(Value::as_str),
        Some("2025-06-01T12:00:00Z")
    );
    assert_eq!(
        documents[1].get("timestamp").and_then(Value::as_str),
        Some("2025-06-01T11:00:00Z")
    );

    store.close().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn disconnected_store_reports_unavailable() {
    let config = MongoConfig {
        url: "mongodb://localhost:1".to_string(),
        database: "nautilus_test_unreachable".to_string(),
        connect_timeout_secs: 1,
    };
    let store = Arc::new(MongoStore::new(config));
    assert!(!store.connect().await);

    let repository = MongoReadingStore::new(store);
    let result = repository
        .insert_document(DataKind::Environmental, Map::new())
        .await;
    assert!(matches!(
        result,
        Err(nautilus_domain::StoreError::Unavailable)
    ));
}
