//! Durable training-data store.
//!
//! Training records are appended one-per-line (JSON Lines) to a records
//! file in the data directory. Append order equals timestamp order, so a
//! downstream training consumer reading the file front-to-back sees
//! records in timestamp order. Each session also writes a small manifest
//! describing the producing device and process.

pub mod reader;
pub mod writer;

use crate::sampler::types::Reading;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export commonly used types
pub use reader::read_records;
pub use writer::{TrainingDataWriter, RECORDS_FILE};

/// The name of this producer, recorded in session manifests.
pub const PRODUCER_NAME: &str = "nexis-collector";

/// One persisted training record: the raw reading alongside its window
/// embedding at the time of collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Timestamp of the reading this record was derived from
    pub timestamp: DateTime<Utc>,
    /// Feature vector encoded from the trailing reading window
    pub embedding: Vec<f32>,
    /// The raw reading
    pub reading: Reading,
}

/// Per-session metadata written beside the records file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionManifest {
    /// Unique id for this collection session
    pub session_id: Uuid,
    /// Host the session ran on
    pub device_id: String,
    /// Producing software
    pub producer: String,
    /// Producer version
    pub version: String,
    /// Session start time
    pub started_at: DateTime<Utc>,
}

impl SessionManifest {
    /// Create a manifest for a session starting now.
    pub fn new() -> Self {
        let device_id = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown-host".to_string());

        Self {
            session_id: Uuid::new_v4(),
            device_id,
            producer: PRODUCER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }
}

impl Default for SessionManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the training-data store.
#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store IO error: {e}"),
            StoreError::Serialize(e) => write!(f, "store serialize error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_identity() {
        let a = SessionManifest::new();
        let b = SessionManifest::new();

        assert_ne!(a.session_id, b.session_id);
        assert_eq!(a.producer, PRODUCER_NAME);
        assert!(!a.device_id.is_empty());
        assert!(!a.version.is_empty());
    }
}
