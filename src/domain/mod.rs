pub mod content_store;
pub mod document_index;
pub mod responses;
mod sensor_reading;

pub use sensor_reading::SensorReading;

/// A stored JSON document.
pub type Document = serde_json::Map<String, serde_json::Value>;
