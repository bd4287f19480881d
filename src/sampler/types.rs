//! Reading types for the biometric collector.
//!
//! A [`Reading`] is one timestamped snapshot of metric values across the four
//! collection categories. Values are plain scalars keyed by metric name so
//! that future sensor backends can report additional metrics without a type
//! change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The four fixed collection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Physiological,
    Cognitive,
    Behavioral,
    Environmental,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Physiological,
        Category::Cognitive,
        Category::Behavioral,
        Category::Environmental,
    ];

    /// Stable storage key for this category's telemetry stream.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Physiological => "physiological",
            Category::Cognitive => "cognitive_state",
            Category::Behavioral => "behavioral_patterns",
            Category::Environmental => "environmental_context",
        }
    }

    /// The metric names declared for this category.
    pub fn declared_metrics(&self) -> &'static [&'static str] {
        match self {
            Category::Physiological => &PHYSIOLOGICAL_METRICS,
            Category::Cognitive => &COGNITIVE_METRICS,
            Category::Behavioral => &BEHAVIORAL_METRICS,
            Category::Environmental => &ENVIRONMENTAL_METRICS,
        }
    }
}

pub const PHYSIOLOGICAL_METRICS: [&str; 5] = [
    "heart_rate",
    "hrv_rmssd",
    "gsr",
    "temperature",
    "respiratory_rate",
];

pub const COGNITIVE_METRICS: [&str; 4] = [
    "attention_level",
    "cognitive_load",
    "focus_stability",
    "executive_function",
];

pub const BEHAVIORAL_METRICS: [&str; 4] = [
    "typing_rhythm",
    "mouse_dynamics",
    "task_switching",
    "stress_indicators",
];

pub const ENVIRONMENTAL_METRICS: [&str; 4] = [
    "time_of_day",
    "day_of_week",
    "ambient_light",
    "noise_level",
];

/// One timestamped multi-category snapshot of metric values.
///
/// Immutable after creation. The category mappings are fixed at construction;
/// a reading never gains or loses metrics once sampled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// When this reading was taken
    pub timestamp: DateTime<Utc>,
    /// Physiological metrics (heart rate, HRV, GSR, ...)
    pub physiological: HashMap<String, f64>,
    /// Cognitive-state estimates (attention, load, ...)
    pub cognitive: HashMap<String, f64>,
    /// Behavioral-pattern metrics (typing rhythm, task switching, ...)
    pub behavioral: HashMap<String, f64>,
    /// Environmental context (time of day, ambient light, ...)
    pub environmental: HashMap<String, f64>,
}

impl Reading {
    /// The metric mapping for a category.
    pub fn category(&self, category: Category) -> &HashMap<String, f64> {
        match category {
            Category::Physiological => &self.physiological,
            Category::Cognitive => &self.cognitive,
            Category::Behavioral => &self.behavioral,
            Category::Environmental => &self.environmental,
        }
    }

    /// Look up a single metric value.
    pub fn metric(&self, category: Category, name: &str) -> Option<f64> {
        self.category(category).get(name).copied()
    }

    /// Total number of metric values in this reading.
    pub fn metric_count(&self) -> usize {
        Category::ALL
            .iter()
            .map(|c| self.category(*c).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reading() -> Reading {
        let mut physiological = HashMap::new();
        physiological.insert("heart_rate".to_string(), 72.0);

        Reading {
            timestamp: Utc::now(),
            physiological,
            cognitive: HashMap::new(),
            behavioral: HashMap::new(),
            environmental: HashMap::new(),
        }
    }

    #[test]
    fn test_metric_lookup() {
        let reading = sample_reading();
        assert_eq!(reading.metric(Category::Physiological, "heart_rate"), Some(72.0));
        assert_eq!(reading.metric(Category::Physiological, "unknown"), None);
        assert_eq!(reading.metric(Category::Cognitive, "attention_level"), None);
    }

    #[test]
    fn test_metric_count() {
        let reading = sample_reading();
        assert_eq!(reading.metric_count(), 1);
    }

    #[test]
    fn test_declared_metrics_cover_all_categories() {
        assert_eq!(Category::Physiological.declared_metrics().len(), 5);
        assert_eq!(Category::Cognitive.declared_metrics().len(), 4);
        assert_eq!(Category::Behavioral.declared_metrics().len(), 4);
        assert_eq!(Category::Environmental.declared_metrics().len(), 4);
    }

    #[test]
    fn test_category_keys_are_distinct() {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key));
        }
    }
}
