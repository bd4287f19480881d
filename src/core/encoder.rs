//! Feature encoding from reading windows.
//!
//! A window of readings is flattened into a fixed-length numeric vector for
//! the downstream model: 15 selected metrics per reading, concatenated in
//! window order, truncated or right-zero-padded to exactly
//! [`EMBEDDING_DIM`] entries. Missing metrics read as zero.

use crate::sampler::types::{Category, Reading, COGNITIVE_METRICS, PHYSIOLOGICAL_METRICS};

/// Length of every encoded feature vector (matches transformer dimensions).
pub const EMBEDDING_DIM: usize = 768;

/// Number of metrics extracted from each reading.
pub const FEATURES_PER_READING: usize = 15;

/// Behavioral metrics included in the encoding.
const ENCODED_BEHAVIORAL: [&str; 2] = ["typing_rhythm", "stress_indicators"];

const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_WEEK: f64 = 7.0;

/// Encode a window of readings into an exactly [`EMBEDDING_DIM`]-length
/// feature vector.
///
/// Pure function: window order is preserved, an empty window yields all
/// zeros, and the result length never varies.
pub fn encode_window(window: &[Reading]) -> Vec<f32> {
    let mut features = Vec::with_capacity(EMBEDDING_DIM);

    for reading in window {
        push_reading_features(&mut features, reading);
        if features.len() >= EMBEDDING_DIM {
            break;
        }
    }

    features.truncate(EMBEDDING_DIM);
    features.resize(EMBEDDING_DIM, 0.0);
    features
}

/// Append the 15 selected metrics of one reading.
fn push_reading_features(features: &mut Vec<f32>, reading: &Reading) {
    for name in PHYSIOLOGICAL_METRICS {
        features.push(metric_or_zero(reading, Category::Physiological, name) as f32);
    }

    for name in COGNITIVE_METRICS {
        features.push(metric_or_zero(reading, Category::Cognitive, name) as f32);
    }

    for name in ENCODED_BEHAVIORAL {
        features.push(metric_or_zero(reading, Category::Behavioral, name) as f32);
    }

    // Time fields are normalized so every environmental entry lands in [0, 1].
    features.push(
        (metric_or_zero(reading, Category::Environmental, "time_of_day") / HOURS_PER_DAY) as f32,
    );
    features.push(
        (metric_or_zero(reading, Category::Environmental, "day_of_week") / DAYS_PER_WEEK) as f32,
    );
    features.push(metric_or_zero(reading, Category::Environmental, "ambient_light") as f32);
    features.push(metric_or_zero(reading, Category::Environmental, "noise_level") as f32);
}

fn metric_or_zero(reading: &Reading, category: Category, name: &str) -> f64 {
    reading.metric(category, name).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SyntheticSampler;
    use chrono::Utc;
    use std::collections::HashMap;

    /// A reading whose 15 encoded values are `base..base+15` before
    /// normalization of the two time fields.
    fn numbered_reading(base: f64) -> Reading {
        let physiological = HashMap::from([
            ("heart_rate".to_string(), base),
            ("hrv_rmssd".to_string(), base + 1.0),
            ("gsr".to_string(), base + 2.0),
            ("temperature".to_string(), base + 3.0),
            ("respiratory_rate".to_string(), base + 4.0),
        ]);
        let cognitive = HashMap::from([
            ("attention_level".to_string(), base + 5.0),
            ("cognitive_load".to_string(), base + 6.0),
            ("focus_stability".to_string(), base + 7.0),
            ("executive_function".to_string(), base + 8.0),
        ]);
        let behavioral = HashMap::from([
            ("typing_rhythm".to_string(), base + 9.0),
            ("stress_indicators".to_string(), base + 10.0),
        ]);
        let environmental = HashMap::from([
            ("time_of_day".to_string(), base + 11.0),
            ("day_of_week".to_string(), base + 12.0),
            ("ambient_light".to_string(), base + 13.0),
            ("noise_level".to_string(), base + 14.0),
        ]);

        Reading {
            timestamp: Utc::now(),
            physiological,
            cognitive,
            behavioral,
            environmental,
        }
    }

    fn expected_features(base: f64) -> Vec<f32> {
        let mut raw: Vec<f32> = (0..15).map(|i| (base + i as f64) as f32).collect();
        raw[11] = ((base + 11.0) / 24.0) as f32;
        raw[12] = ((base + 12.0) / 7.0) as f32;
        raw
    }

    #[test]
    fn test_empty_window_is_all_zeros() {
        let vector = encode_window(&[]);
        assert_eq!(vector.len(), EMBEDDING_DIM);
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_short_window_is_zero_padded() {
        let window = vec![numbered_reading(100.0), numbered_reading(200.0)];
        let vector = encode_window(&window);

        assert_eq!(vector.len(), EMBEDDING_DIM);
        let raw_count = window.len() * FEATURES_PER_READING;
        assert!(vector[raw_count..].iter().all(|&v| v == 0.0));
        assert_ne!(vector[raw_count - 1], 0.0);
    }

    #[test]
    fn test_long_window_truncates_in_order() {
        // 60 readings produce 900 raw values; the vector must equal the
        // first 768 in window order.
        let window: Vec<Reading> = (0..60).map(|i| numbered_reading(i as f64 * 100.0)).collect();
        let vector = encode_window(&window);

        let mut raw = Vec::new();
        for reading in &window {
            raw.extend(expected_features(
                reading.metric(Category::Physiological, "heart_rate").unwrap(),
            ));
        }
        assert!(raw.len() > EMBEDDING_DIM);
        assert_eq!(vector, raw[..EMBEDDING_DIM]);
    }

    #[test]
    fn test_length_is_fixed_for_any_window() {
        for count in [0usize, 1, 50, 1000] {
            let window: Vec<Reading> = (0..count).map(|i| numbered_reading(i as f64)).collect();
            assert_eq!(encode_window(&window).len(), EMBEDDING_DIM);
        }
    }

    #[test]
    fn test_time_fields_normalized_to_unit_interval() {
        for hour in 0..24 {
            for weekday in 0..7 {
                let mut reading = numbered_reading(0.0);
                reading
                    .environmental
                    .insert("time_of_day".to_string(), hour as f64);
                reading
                    .environmental
                    .insert("day_of_week".to_string(), weekday as f64);

                let vector = encode_window(std::slice::from_ref(&reading));
                assert!((0.0..=1.0).contains(&vector[11]));
                assert!((0.0..=1.0).contains(&vector[12]));
            }
        }
    }

    #[test]
    fn test_missing_metrics_read_as_zero() {
        let reading = Reading {
            timestamp: Utc::now(),
            physiological: HashMap::new(),
            cognitive: HashMap::new(),
            behavioral: HashMap::new(),
            environmental: HashMap::new(),
        };
        let vector = encode_window(std::slice::from_ref(&reading));
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_reading_layout() {
        let mut reading = numbered_reading(0.0);
        reading.physiological.insert("heart_rate".to_string(), 70.0);
        reading.environmental.insert("time_of_day".to_string(), 12.0);
        reading.environmental.insert("day_of_week".to_string(), 3.0);
        reading.environmental.insert("ambient_light".to_string(), 0.5);
        reading.environmental.insert("noise_level".to_string(), 0.2);

        let vector = encode_window(std::slice::from_ref(&reading));

        assert_eq!(vector[0], 70.0);
        assert_eq!(vector[11], (12.0 / 24.0) as f32);
        assert_eq!(vector[12], (3.0 / 7.0) as f32);
        assert_eq!(vector[13], 0.5);
        assert_eq!(vector[14], 0.2);
        assert!(vector[15..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_seeded_sampler_encodes_deterministically() {
        let ts = Utc::now();

        let window_a: Vec<Reading> = {
            let mut sampler = SyntheticSampler::with_seed(7);
            (0..20).map(|_| sampler.sample_at(ts)).collect()
        };
        let window_b: Vec<Reading> = {
            let mut sampler = SyntheticSampler::with_seed(7);
            (0..20).map(|_| sampler.sample_at(ts)).collect()
        };

        assert_eq!(encode_window(&window_a), encode_window(&window_b));
    }
}
