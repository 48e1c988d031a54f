use crate::error::DomainResult;
use crate::kind::DataKind;
use crate::validate::{
    cartesian_axes, location_axes, orientation_axes, validate_struct,
};
use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Timestamps serialize with a fixed microsecond width so the stored strings
/// sort lexicographically in chronological order. Chrono's default RFC3339
/// output has variable sub-second precision, which breaks that ordering when
/// whole-second and fractional values share a second.
mod rfc3339_micros {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}

/// Temperature/humidity reading from a DHT-class environmental sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EnvironmentalReading {
    #[garde(length(min = 1))]
    pub sensor_id: String,
    #[garde(skip)]
    pub temperature: f64,
    #[garde(skip)]
    pub humidity: f64,
    #[garde(skip)]
    #[serde(default, with = "rfc3339_micros", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[garde(inner(custom(location_axes)))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<HashMap<String, f64>>,
}

/// Position/orientation/velocity sample from the navigation stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NavigationReading {
    #[garde(length(min = 1))]
    pub device_id: String,
    #[garde(custom(cartesian_axes))]
    pub position: HashMap<String, f64>,
    #[garde(custom(orientation_axes))]
    pub orientation: HashMap<String, f64>,
    #[garde(inner(custom(cartesian_axes)))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<HashMap<String, f64>>,
    #[garde(skip)]
    #[serde(default, with = "rfc3339_micros", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Sonar/LiDAR scan: an ordered sequence of free-form point records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MappingReading {
    #[garde(length(min = 1))]
    pub sensor_id: String,
    #[garde(skip)]
    pub scan_data: Vec<Map<String, Value>>,
    #[garde(skip)]
    #[serde(default, with = "rfc3339_micros", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[garde(inner(custom(cartesian_axes)))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<HashMap<String, f64>>,
}

/// Catch-all reading for sensors without a dedicated shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeneralReading {
    #[garde(length(min = 1))]
    pub sensor_type: String,
    #[garde(length(min = 1))]
    pub sensor_id: String,
    #[garde(skip)]
    pub data: Map<String, Value>,
    #[garde(skip)]
    #[serde(default, with = "rfc3339_micros", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Ordered batch of free-form data points, persisted as one envelope
/// document rather than N independent inserts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReading {
    pub points: Vec<Map<String, Value>>,
    #[serde(with = "rfc3339_micros", skip_serializing_if = "Option::is_none")]
    pub batch_timestamp: Option<DateTime<Utc>>,
}

impl BatchReading {
    pub fn new(points: Vec<Map<String, Value>>) -> Self {
        Self {
            points,
            batch_timestamp: None,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Storage envelope wrapping the points as one logical unit
    fn envelope(&self) -> Map<String, Value> {
        let mut document = Map::new();
        if let Some(ts) = self.batch_timestamp {
            document.insert(
                "batch_timestamp".to_string(),
                json!(ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)),
            );
        }
        document.insert("batch_size".to_string(), json!(self.points.len()));
        document.insert(
            "data_points".to_string(),
            Value::Array(self.points.iter().cloned().map(Value::Object).collect()),
        );
        document
    }
}

/// One inbound telemetry record, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TelemetryRecord {
    Environmental(EnvironmentalReading),
    Navigation(NavigationReading),
    Mapping(MappingReading),
    General(GeneralReading),
    Batch(BatchReading),
}

impl TelemetryRecord {
    pub fn kind(&self) -> DataKind {
        match self {
            TelemetryRecord::Environmental(_) => DataKind::Environmental,
            TelemetryRecord::Navigation(_) => DataKind::Navigation,
            TelemetryRecord::Mapping(_) => DataKind::Mapping,
            TelemetryRecord::General(_) => DataKind::General,
            TelemetryRecord::Batch(_) => DataKind::Batch,
        }
    }

    /// Structural validation of required fields and axis sub-objects.
    /// Batch points are free-form and pass through unchanged.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            TelemetryRecord::Environmental(r) => validate_struct(r),
            TelemetryRecord::Navigation(r) => validate_struct(r),
            TelemetryRecord::Mapping(r) => validate_struct(r),
            TelemetryRecord::General(r) => validate_struct(r),
            TelemetryRecord::Batch(_) => Ok(()),
        }
    }

    /// Fill a missing timestamp with `now`. Applied exactly once per record,
    /// before persistence and before the record is echoed back, so the caller
    /// sees the same instant that was stored.
    pub fn ensure_timestamp(&mut self, now: DateTime<Utc>) {
        let slot = match self {
            TelemetryRecord::Environmental(r) => &mut r.timestamp,
            TelemetryRecord::Navigation(r) => &mut r.timestamp,
            TelemetryRecord::Mapping(r) => &mut r.timestamp,
            TelemetryRecord::General(r) => &mut r.timestamp,
            TelemetryRecord::Batch(r) => &mut r.batch_timestamp,
        };
        if slot.is_none() {
            *slot = Some(now);
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            TelemetryRecord::Environmental(r) => r.timestamp,
            TelemetryRecord::Navigation(r) => r.timestamp,
            TelemetryRecord::Mapping(r) => r.timestamp,
            TelemetryRecord::General(r) => r.timestamp,
            TelemetryRecord::Batch(r) => r.batch_timestamp,
        }
    }

    /// Document to persist for this record. Batches wrap their points in one
    /// envelope; everything else stores its normalized fields verbatim.
    pub fn to_document(&self) -> Map<String, Value> {
        match self {
            TelemetryRecord::Batch(batch) => batch.envelope(),
            other => match serde_json::to_value(other) {
                // Readings always serialize to JSON objects
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
        }
    }
}
