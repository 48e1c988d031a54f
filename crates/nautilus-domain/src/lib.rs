pub mod error;
pub mod ingest_service;
pub mod kind;
pub mod outcome;
pub mod query_service;
pub mod reading;
pub mod stats_service;
pub mod store;
pub mod validate;

pub use error::{DomainError, DomainResult, StoreError, StoreResult};
pub use ingest_service::IngestService;
pub use kind::DataKind;
pub use outcome::{IngestOutcome, IngestReceipt};
pub use query_service::{QueryInput, QueryService};
pub use reading::{
    BatchReading, EnvironmentalReading, GeneralReading, MappingReading, NavigationReading,
    TelemetryRecord,
};
pub use stats_service::{CollectionCount, StatsService};
pub use store::{EqualityFilter, ReadingStore};

// Re-export mocks when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use store::MockReadingStore;
