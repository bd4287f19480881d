//! Append-only writer for training records.

use crate::store::{SessionManifest, StoreError, TrainingRecord};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the append-only records file.
pub const RECORDS_FILE: &str = "training_records.jsonl";

/// Appends training records to the data directory, one JSON line per
/// record. Data is synced after every append so a record is durable once
/// `append` returns.
pub struct TrainingDataWriter {
    records_path: PathBuf,
    file: File,
    records_written: u64,
}

impl TrainingDataWriter {
    /// Open the store in `data_dir`, creating it if needed, and write the
    /// session manifest.
    pub fn open(data_dir: &Path, manifest: &SessionManifest) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io(e.to_string()))?;

        let manifest_path = data_dir.join(format!(
            "session_{}.json",
            manifest.started_at.format("%Y%m%d_%H%M%S")
        ));
        let manifest_json = serde_json::to_string_pretty(manifest)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&manifest_path, manifest_json)
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let records_path = data_dir.join(RECORDS_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&records_path)
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Self {
            records_path,
            file,
            records_written: 0,
        })
    }

    /// Durably append one record.
    pub fn append(&mut self, record: &TrainingRecord) -> Result<(), StoreError> {
        let line =
            serde_json::to_string(record).map_err(|e| StoreError::Serialize(e.to_string()))?;

        writeln!(self.file, "{line}").map_err(|e| StoreError::Io(e.to_string()))?;
        self.file
            .sync_data()
            .map_err(|e| StoreError::Io(e.to_string()))?;

        self.records_written += 1;
        Ok(())
    }

    /// Path of the records file.
    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    /// Number of records appended by this writer.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SyntheticSampler;
    use crate::store::read_records;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("nexis-collector-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_append_and_read_back_in_order() {
        let dir = scratch_dir();
        let manifest = SessionManifest::new();
        let mut writer = TrainingDataWriter::open(&dir, &manifest).unwrap();

        let mut sampler = SyntheticSampler::with_seed(5);
        let start = Utc::now();
        for i in 0..3 {
            let reading = sampler.sample_at(start + Duration::seconds(i));
            let record = TrainingRecord {
                timestamp: reading.timestamp,
                embedding: vec![i as f32; 4],
                reading,
            };
            writer.append(&record).unwrap();
        }
        assert_eq!(writer.records_written(), 3);

        let records = read_records(writer.records_path()).unwrap();
        assert_eq!(records.len(), 3);
        for pair in records.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        assert_eq!(records[1].embedding, vec![1.0; 4]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_writes_manifest() {
        let dir = scratch_dir();
        let manifest = SessionManifest::new();
        let _writer = TrainingDataWriter::open(&dir, &manifest).unwrap();

        let manifests: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("session_") && name.ends_with(".json"))
            .collect();
        assert_eq!(manifests.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reopen_appends_to_existing_records() {
        let dir = scratch_dir();
        let mut sampler = SyntheticSampler::with_seed(6);
        let start = Utc::now();

        for batch in 0..2i64 {
            let manifest = SessionManifest::new();
            let mut writer = TrainingDataWriter::open(&dir, &manifest).unwrap();
            let reading = sampler.sample_at(start + Duration::seconds(batch));
            let record = TrainingRecord {
                timestamp: reading.timestamp,
                embedding: vec![0.0; 4],
                reading,
            };
            writer.append(&record).unwrap();
        }

        let records = read_records(&dir.join(RECORDS_FILE)).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].timestamp < records[1].timestamp);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
