//! Reader for the training-data store.

use crate::store::{StoreError, TrainingRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every record from a records file, preserving file order.
///
/// File order equals append order, which equals timestamp order for a
/// single producer, so the result is ready for training consumption.
pub fn read_records(path: &Path) -> Result<Vec<TrainingRecord>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::Io(e.to_string()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| StoreError::Io(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TrainingRecord =
            serde_json::from_str(&line).map_err(|e| StoreError::Serialize(e.to_string()))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_records(Path::new("/nonexistent/training_records.jsonl"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_malformed_line_is_serialize_error() {
        let dir = std::env::temp_dir().join(format!(
            "nexis-collector-test-{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.jsonl");
        std::fs::write(&path, "not json\n").unwrap();

        let result = read_records(&path);
        assert!(matches!(result, Err(StoreError::Serialize(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
