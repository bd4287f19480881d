//! Session collection statistics.
//!
//! Tracks what the collector has done this session and, with persistence
//! enabled, accumulates counts across sessions in the data directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Collection statistics for the current session.
#[derive(Debug)]
pub struct CollectionStats {
    /// Number of readings sampled
    readings_sampled: AtomicU64,
    /// Number of metric values appended to telemetry streams
    values_recorded: AtomicU64,
    /// Number of windows encoded into feature vectors
    windows_encoded: AtomicU64,
    /// Number of training records persisted
    records_persisted: AtomicU64,
    /// Number of recoverable collection errors
    recoverable_errors: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self {
            readings_sampled: AtomicU64::new(0),
            values_recorded: AtomicU64::new(0),
            windows_encoded: AtomicU64::new(0),
            records_persisted: AtomicU64::new(0),
            recoverable_errors: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create stats with persistence, loading any previous counts.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut stats = Self::new();
        stats.persist_path = Some(path);

        if let Err(e) = stats.load() {
            eprintln!("Note: Could not load previous collection stats: {e}");
        }

        stats
    }

    pub fn record_reading(&self) {
        self.readings_sampled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_values(&self, count: u64) {
        self.values_recorded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_window_encoded(&self) {
        self.windows_encoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persisted(&self) {
        self.records_persisted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_recoverable_error(&self) {
        self.recoverable_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            readings_sampled: self.readings_sampled.load(Ordering::Relaxed),
            values_recorded: self.values_recorded.load(Ordering::Relaxed),
            windows_encoded: self.windows_encoded.load(Ordering::Relaxed),
            records_persisted: self.records_persisted.load(Ordering::Relaxed),
            recoverable_errors: self.recoverable_errors.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.snapshot();
        format!(
            "Session Statistics:\n\
             - Readings sampled: {}\n\
             - Metric values recorded: {}\n\
             - Windows encoded: {}\n\
             - Training records persisted: {}\n\
             - Recoverable errors: {}\n\
             - Session duration: {} seconds",
            stats.readings_sampled,
            stats.values_recorded,
            stats.windows_encoded,
            stats.records_persisted,
            stats.recoverable_errors,
            stats.session_duration_secs
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.snapshot();
            let persisted = PersistedStats {
                readings_sampled: stats.readings_sampled,
                values_recorded: stats.values_recorded,
                windows_encoded: stats.windows_encoded,
                records_persisted: stats.records_persisted,
                recoverable_errors: stats.recoverable_errors,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load stats from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.readings_sampled
                    .store(persisted.readings_sampled, Ordering::Relaxed);
                self.values_recorded
                    .store(persisted.values_recorded, Ordering::Relaxed);
                self.windows_encoded
                    .store(persisted.windows_encoded, Ordering::Relaxed);
                self.records_persisted
                    .store(persisted.records_persisted, Ordering::Relaxed);
                self.recoverable_errors
                    .store(persisted.recoverable_errors, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.readings_sampled.store(0, Ordering::Relaxed);
        self.values_recorded.store(0, Ordering::Relaxed);
        self.windows_encoded.store(0, Ordering::Relaxed);
        self.records_persisted.store(0, Ordering::Relaxed);
        self.recoverable_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for CollectionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of collection statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub readings_sampled: u64,
    pub values_recorded: u64,
    pub windows_encoded: u64,
    pub records_persisted: u64,
    pub recoverable_errors: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    readings_sampled: u64,
    values_recorded: u64,
    windows_encoded: u64,
    records_persisted: u64,
    recoverable_errors: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared collection stats.
pub type SharedCollectionStats = Arc<CollectionStats>;

/// Create new shared stats without persistence.
pub fn create_shared_stats() -> SharedCollectionStats {
    Arc::new(CollectionStats::new())
}

/// Create new shared stats with persistence.
pub fn create_shared_stats_with_persistence(path: PathBuf) -> SharedCollectionStats {
    Arc::new(CollectionStats::with_persistence(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counting() {
        let stats = CollectionStats::new();

        stats.record_reading();
        stats.record_reading();
        stats.record_values(17);
        stats.record_persisted();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.readings_sampled, 2);
        assert_eq!(snapshot.values_recorded, 17);
        assert_eq!(snapshot.records_persisted, 1);
        assert_eq!(snapshot.recoverable_errors, 0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = CollectionStats::new();
        stats.record_reading();
        stats.record_recoverable_error();
        stats.reset();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.readings_sampled, 0);
        assert_eq!(snapshot.recoverable_errors, 0);
    }

    #[test]
    fn test_summary_format() {
        let stats = CollectionStats::new();
        let summary = stats.summary();

        assert!(summary.contains("Readings sampled"));
        assert!(summary.contains("Training records persisted"));
        assert!(summary.contains("Recoverable errors"));
    }
}
