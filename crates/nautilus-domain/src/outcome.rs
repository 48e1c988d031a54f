use crate::reading::TelemetryRecord;

/// Tri-state classification of one ingestion attempt.
///
/// A store outage degrades to `AcceptedUnsaved` instead of rejecting producer
/// traffic; only structural validation hard-rejects a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Insert succeeded; carries the store-assigned identifier as an opaque
    /// string, the sole handle returned for audit.
    Saved { database_id: String },
    /// The store was unreachable; payload acknowledged but explicitly unsaved.
    AcceptedUnsaved,
    /// A live connection existed but the insert failed; message is sanitized.
    Failed { message: String },
}

impl IngestOutcome {
    /// Wire label for this outcome
    pub fn status_label(&self) -> &'static str {
        match self {
            IngestOutcome::Saved { .. } => "success",
            IngestOutcome::AcceptedUnsaved => "partial_success",
            IngestOutcome::Failed { .. } => "error",
        }
    }

    pub fn database_id(&self) -> Option<&str> {
        match self {
            IngestOutcome::Saved { database_id } => Some(database_id),
            _ => None,
        }
    }
}

/// Result of one ingestion: the normalized record (always echoed back, so no
/// data is silently dropped from the response) plus its outcome.
#[derive(Debug, Clone)]
pub struct IngestReceipt {
    pub record: TelemetryRecord,
    pub outcome: IngestOutcome,
}
