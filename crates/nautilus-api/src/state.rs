use nautilus_domain::{IngestService, QueryService, ReadingStore, StatsService};
use std::sync::Arc;

/// Shared handler state: the domain services plus the store handle observed
/// by the health endpoint. Built once in the server binary and injected here;
/// handlers never reach for ambient globals.
#[derive(Clone)]
pub struct ApiState {
    pub ingest: Arc<IngestService>,
    pub query: Arc<QueryService>,
    pub stats: Arc<StatsService>,
    pub store: Arc<dyn ReadingStore>,
    pub database_name: String,
}

impl ApiState {
    pub fn new(store: Arc<dyn ReadingStore>, database_name: String) -> Self {
        Self {
            ingest: Arc::new(IngestService::new(store.clone())),
            query: Arc::new(QueryService::new(store.clone())),
            stats: Arc::new(StatsService::new(store.clone())),
            store,
            database_name,
        }
    }
}
