//! In-memory telemetry streams.
//!
//! Every metric value of every reading is appended, tagged with the
//! reading's timestamp, to an ordered per-metric stream. Streams are
//! unbounded and live only in process memory; durable output goes through
//! the training-data store instead.

use crate::sampler::types::{Category, Reading};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::warn;

/// One appended metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Append-only, per-metric ordered history of values.
///
/// Streams for the declared metric names exist from construction. Metric
/// names outside the declared set are not dropped: the first occurrence
/// logs a warning and registers a new stream.
#[derive(Debug)]
pub struct TelemetryLog {
    streams: HashMap<Category, HashMap<String, Vec<MetricSample>>>,
}

impl TelemetryLog {
    /// Create a log with empty streams for every declared metric.
    pub fn new() -> Self {
        let mut streams = HashMap::new();
        for category in Category::ALL {
            let mut metrics = HashMap::new();
            for name in category.declared_metrics() {
                metrics.insert((*name).to_string(), Vec::new());
            }
            streams.insert(category, metrics);
        }
        Self { streams }
    }

    /// Append every metric value of a reading to its stream.
    ///
    /// Returns the number of values appended.
    pub fn append(&mut self, reading: &Reading) -> usize {
        let mut appended = 0;

        for category in Category::ALL {
            let streams = self.streams.entry(category).or_default();

            for (name, value) in reading.category(category) {
                let stream = match streams.entry(name.clone()) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        warn!(
                            category = category.key(),
                            metric = name.as_str(),
                            "registering undeclared metric stream"
                        );
                        entry.insert(Vec::new())
                    }
                };
                stream.push(MetricSample {
                    timestamp: reading.timestamp,
                    value: *value,
                });
                appended += 1;
            }
        }

        appended
    }

    /// The ordered samples for one metric, if the stream exists.
    pub fn series(&self, category: Category, name: &str) -> Option<&[MetricSample]> {
        self.streams
            .get(&category)
            .and_then(|metrics| metrics.get(name))
            .map(|samples| samples.as_slice())
    }

    /// Number of streams in a category.
    pub fn metric_count(&self, category: Category) -> usize {
        self.streams.get(&category).map_or(0, |m| m.len())
    }

    /// Total number of samples across all streams.
    pub fn sample_count(&self) -> usize {
        self.streams
            .values()
            .flat_map(|metrics| metrics.values())
            .map(|samples| samples.len())
            .sum()
    }
}

impl Default for TelemetryLog {
    fn default() -> Self {
        Self::new()
    }
}
