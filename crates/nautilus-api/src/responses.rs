use chrono::{DateTime, Utc};
use nautilus_domain::{CollectionCount, DataKind, IngestOutcome, IngestReceipt};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Liveness banner for `GET /`
#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub status: &'static str,
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database_connected: bool,
}

/// Tri-state response body shared by the single-record ingestion endpoints
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub message: String,
    pub data_received: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchIngestResponse {
    pub status: &'static str,
    pub message: String,
    pub data_points_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub status: &'static str,
    pub count: usize,
    pub data: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub status: &'static str,
    pub database: String,
    pub collections: BTreeMap<&'static str, CollectionCount>,
}

fn kind_label(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Environmental => "DHT sensor data",
        DataKind::Navigation => "Navigation data",
        DataKind::Mapping => "Mapping data",
        DataKind::General => "General sensor data",
        DataKind::Batch => "Batch data",
    }
}

fn outcome_message(kind: DataKind, outcome: &IngestOutcome) -> String {
    let label = kind_label(kind);
    match outcome {
        IngestOutcome::Saved { .. } => format!("{label} received and saved to database"),
        IngestOutcome::AcceptedUnsaved => {
            format!("{label} received but not saved (database unavailable)")
        }
        IngestOutcome::Failed { message } => format!("{label} received but {message}"),
    }
}

impl IngestResponse {
    pub fn from_receipt(receipt: &IngestReceipt) -> Self {
        let kind = receipt.record.kind();
        Self {
            status: receipt.outcome.status_label(),
            message: outcome_message(kind, &receipt.outcome),
            // Records always serialize; fall back to null rather than fault
            data_received: serde_json::to_value(&receipt.record).unwrap_or_default(),
            database_id: receipt.outcome.database_id().map(str::to_string),
        }
    }
}

impl BatchIngestResponse {
    pub fn from_receipt(receipt: &IngestReceipt, points: usize) -> Self {
        let message = format!(
            "{} ({points} points)",
            outcome_message(DataKind::Batch, &receipt.outcome)
        );
        Self {
            status: receipt.outcome.status_label(),
            message,
            data_points_count: points,
            database_id: receipt.outcome.database_id().map(str::to_string),
        }
    }
}
