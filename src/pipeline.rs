//! Collection pipeline driver.
//!
//! One tick runs sample → aggregate → select window → encode → persist.
//! The loop runs at a fixed best-effort rate: it sleeps the configured
//! interval after each successful tick, with no drift correction and no
//! skip-if-overrun. Cancellation is cooperative through a shared flag
//! checked at each iteration boundary.

use crate::core::encoder::encode_window;
use crate::core::history::ReadingHistory;
use crate::sampler::{SampleError, SensorSource};
use crate::store::{StoreError, TrainingDataWriter, TrainingRecord};
use crate::telemetry::{SharedCollectionStats, TelemetryLog};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Errors from one collection iteration.
#[derive(Debug)]
pub enum CollectError {
    /// The sensor source failed to produce a reading.
    Sample(SampleError),
    /// The training-data store rejected the record.
    Store(StoreError),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Sample(e) => write!(f, "sampling failed: {e}"),
            CollectError::Store(e) => write!(f, "persistence failed: {e}"),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<SampleError> for CollectError {
    fn from(e: SampleError) -> Self {
        CollectError::Sample(e)
    }
}

impl From<StoreError> for CollectError {
    fn from(e: StoreError) -> Self {
        CollectError::Store(e)
    }
}

/// What the loop does after a failed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Run the next iteration without waiting.
    RetryImmediately,
    /// Wait out a backoff before the next iteration.
    RetryAfterDelay(Duration),
    /// Stop the loop and surface the error.
    Abort,
}

/// Map an iteration error to its recovery action.
///
/// Sensor failures and store I/O failures are treated as transient and
/// retried after a short backoff. A record that cannot be serialized will
/// not fix itself by waiting, so it aborts the run.
pub fn recovery_policy(error: &CollectError) -> RecoveryAction {
    match error {
        CollectError::Sample(SampleError::Unavailable(_)) => {
            RecoveryAction::RetryAfterDelay(Duration::from_secs(1))
        }
        CollectError::Store(StoreError::Io(_)) => {
            RecoveryAction::RetryAfterDelay(Duration::from_secs(1))
        }
        CollectError::Store(StoreError::Serialize(_)) => RecoveryAction::Abort,
    }
}

/// The collection pipeline: sampler, telemetry, history, and store wired
/// into a single cooperative loop.
pub struct Pipeline<S: SensorSource> {
    source: S,
    telemetry: TelemetryLog,
    history: ReadingHistory,
    writer: TrainingDataWriter,
    stats: SharedCollectionStats,
    sample_interval: Duration,
    window: chrono::Duration,
}

impl<S: SensorSource> Pipeline<S> {
    pub fn new(
        source: S,
        writer: TrainingDataWriter,
        stats: SharedCollectionStats,
        sample_interval: Duration,
        window_minutes: u64,
    ) -> Self {
        Self {
            source,
            telemetry: TelemetryLog::new(),
            history: ReadingHistory::new(),
            writer,
            stats,
            sample_interval,
            window: chrono::Duration::minutes(window_minutes as i64),
        }
    }

    /// Run one collection iteration.
    pub fn tick(&mut self) -> Result<(), CollectError> {
        let reading = self.source.sample()?;
        self.stats.record_reading();

        let appended = self.telemetry.append(&reading);
        self.stats.record_values(appended as u64);

        self.history.push(reading.clone());
        let window = self.history.recent(self.window, reading.timestamp);
        let window_len = window.len();
        let embedding = encode_window(window);
        self.stats.record_window_encoded();

        let record = TrainingRecord {
            timestamp: reading.timestamp,
            embedding,
            reading,
        };
        self.writer.append(&record)?;
        self.stats.record_persisted();

        debug!(
            records = self.writer.records_written(),
            window_len, "persisted training record"
        );
        Ok(())
    }

    /// Run the collection loop until the flag clears, the deadline passes,
    /// or a fatal error occurs.
    ///
    /// The sleep after each iteration is the loop's only suspension point.
    pub async fn run(
        &mut self,
        running: Arc<AtomicBool>,
        deadline: Option<Instant>,
    ) -> Result<(), CollectError> {
        info!(
            interval_ms = self.sample_interval.as_millis() as u64,
            window_minutes = self.window.num_minutes(),
            "starting continuous collection"
        );

        while running.load(Ordering::SeqCst) {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    info!("collection duration elapsed");
                    break;
                }
            }

            match self.tick() {
                Ok(()) => tokio::time::sleep(self.sample_interval).await,
                Err(e) => match recovery_policy(&e) {
                    RecoveryAction::RetryImmediately => {
                        warn!(error = %e, "recoverable collection error, retrying");
                        self.stats.record_recoverable_error();
                    }
                    RecoveryAction::RetryAfterDelay(delay) => {
                        warn!(error = %e, delay_ms = delay.as_millis() as u64,
                              "recoverable collection error, backing off");
                        self.stats.record_recoverable_error();
                        tokio::time::sleep(delay).await;
                    }
                    RecoveryAction::Abort => {
                        error!(error = %e, "fatal collection error, stopping");
                        return Err(e);
                    }
                },
            }
        }

        info!("collection stopped");
        Ok(())
    }

    pub fn stats(&self) -> &SharedCollectionStats {
        &self.stats
    }

    pub fn history(&self) -> &ReadingHistory {
        &self.history
    }

    pub fn telemetry(&self) -> &TelemetryLog {
        &self.telemetry
    }

    pub fn writer(&self) -> &TrainingDataWriter {
        &self.writer
    }
}
