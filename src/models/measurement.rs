use super::options::Slot;
use chrono::{DateTime, Utc};

/// The most recent reading for one city and parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementResult {
    pub city: String,
    pub value: f64,
    pub unit: String,
    pub parameter: String,
    pub location: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl MeasurementResult {
    /// Value and unit exactly as received, e.g. `"12.3 µg/m³"`.
    pub fn reading(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

/// A published measurement tagged with the slot that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMeasurement {
    pub slot: Slot,
    pub measurement: MeasurementResult,
}

/// Lookup for a single slot's latest measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementQuery {
    pub slot: Slot,
    pub city: String,
    pub parameter: String,
}
