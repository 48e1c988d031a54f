use crate::error::{DomainResult, StoreError};
use crate::outcome::{IngestOutcome, IngestReceipt};
use crate::reading::TelemetryRecord;
use crate::store::ReadingStore;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Persistence gateway: validates a record, normalizes its timestamp, routes
/// it to the collection for its kind and attempts exactly one insert.
///
/// Flow:
/// 1. Structural validation (hard reject, no store interaction)
/// 2. Timestamp normalization (applied once)
/// 3. Single insert against the routed collection
/// 4. Classify the attempt into the tri-state [`IngestOutcome`]
pub struct IngestService {
    store: Arc<dyn ReadingStore>,
}

impl IngestService {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }

    /// Ingest one record. Store failures never surface as errors here; they
    /// are folded into the outcome so producers never receive a hard failure
    /// merely because the backing store is unreachable.
    #[instrument(skip(self, record), fields(kind = record.kind().stats_key()))]
    pub async fn ingest(&self, mut record: TelemetryRecord) -> DomainResult<IngestReceipt> {
        record.validate()?;
        record.ensure_timestamp(chrono::Utc::now());

        let kind = record.kind();
        let collection = kind.collection_name();
        debug!(collection, "persisting telemetry record");

        let outcome = match self.store.insert_document(kind, record.to_document()).await {
            Ok(database_id) => {
                info!(collection, database_id = %database_id, "record saved");
                IngestOutcome::Saved { database_id }
            }
            Err(StoreError::Unavailable) => {
                warn!(collection, "store unavailable, record accepted without persistence");
                IngestOutcome::AcceptedUnsaved
            }
            Err(StoreError::Operation(e)) => {
                error!(collection, error = %e, "insert failed");
                IngestOutcome::Failed {
                    message: "database error while saving record".to_string(),
                }
            }
        };

        Ok(IngestReceipt { record, outcome })
    }
}
