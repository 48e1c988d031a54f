/// Closed enumeration of the telemetry record shapes the service accepts.
///
/// Collection routing is an exhaustive match over this tag, so every kind is
/// guaranteed a routing target at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Environmental,
    Navigation,
    Mapping,
    General,
    Batch,
}

impl DataKind {
    pub const ALL: [DataKind; 5] = [
        DataKind::Environmental,
        DataKind::Navigation,
        DataKind::Mapping,
        DataKind::General,
        DataKind::Batch,
    ];

    /// Physical collection name. Total and stable for the process lifetime.
    pub fn collection_name(self) -> &'static str {
        match self {
            DataKind::Environmental => "dht_sensor_data",
            DataKind::Navigation => "navigation_data",
            DataKind::Mapping => "mapping_data",
            DataKind::General => "general_sensor_data",
            DataKind::Batch => "batch_data",
        }
    }

    /// Key used for this kind in the stats response.
    pub fn stats_key(self) -> &'static str {
        match self {
            DataKind::Environmental => "dht_sensor",
            DataKind::Navigation => "navigation",
            DataKind::Mapping => "mapping",
            DataKind::General => "general_sensor",
            DataKind::Batch => "batch_data",
        }
    }

    /// Equality-filter field supported by queries against this kind.
    pub fn filter_field(self) -> Option<&'static str> {
        match self {
            DataKind::Environmental | DataKind::Mapping | DataKind::General => Some("sensor_id"),
            DataKind::Navigation => Some("device_id"),
            DataKind::Batch => None,
        }
    }
}
