use crate::domain::Document;
use serde::{Deserialize, Deserializer, Serialize};

/// A single telemetry sample as posted by a device. Missing or `null` fields take their zero value and unknown
/// fields are dropped.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorReading {
    #[serde(deserialize_with = "null_as_default")]
    pub device_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gps_lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub gps_lng: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64, // Unix seconds
    #[serde(deserialize_with = "null_as_default")]
    pub temp_cel: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub humidity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tvoc_ppb: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub eco2_ppm: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub aqi: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_public: bool,
}

impl SensorReading {
    /// Decodes a posted body. A `null` body is an all-zero reading.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<SensorReading>>(body).map(Option::unwrap_or_default)
    }

    /// Converts the reading into a document with its keys in sorted order, so equal readings serialize to equal bytes.
    pub fn to_document(&self) -> Result<Document, serde_json::Error> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
