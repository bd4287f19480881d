//! Synthetic sensor source.
//!
//! Every metric is a random draw standing in for a real sensor. Distribution
//! parameters follow the profiles the downstream training pipeline expects;
//! a hardware-backed [`SensorSource`](crate::sampler::SensorSource) will
//! replace this module once real drivers land.

use crate::sampler::types::Reading;
use crate::sampler::{SampleError, SensorSource};
use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use std::collections::HashMap;

const HEART_RATE_MEAN: f64 = 70.0;
const HEART_RATE_STD: f64 = 5.0;
const HRV_MEAN: f64 = 50.0;
const HRV_STD: f64 = 10.0;
const TEMPERATURE_MEAN: f64 = 98.6;
const TEMPERATURE_STD: f64 = 0.5;
const RESPIRATORY_MEAN: f64 = 16.0;
const RESPIRATORY_STD: f64 = 2.0;

/// A sensor source backed entirely by random draws.
pub struct SyntheticSampler {
    rng: StdRng,
    heart_rate: Normal,
    hrv: Normal,
    temperature: Normal,
    respiratory: Normal,
}

impl SyntheticSampler {
    /// Create a sampler seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a sampler with a fixed seed for reproducible draws.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            heart_rate: Normal::new(HEART_RATE_MEAN, HEART_RATE_STD)
                .expect("finite mean and positive std dev"),
            hrv: Normal::new(HRV_MEAN, HRV_STD).expect("finite mean and positive std dev"),
            temperature: Normal::new(TEMPERATURE_MEAN, TEMPERATURE_STD)
                .expect("finite mean and positive std dev"),
            respiratory: Normal::new(RESPIRATORY_MEAN, RESPIRATORY_STD)
                .expect("finite mean and positive std dev"),
        }
    }

    /// Take one reading stamped with the given instant.
    ///
    /// The environmental time fields are derived from the instant's local
    /// hour and weekday, so tests can pin the clock.
    pub fn sample_at(&mut self, timestamp: DateTime<Utc>) -> Reading {
        let local = timestamp.with_timezone(&Local);

        let physiological = HashMap::from([
            ("heart_rate".to_string(), self.rng.sample(&self.heart_rate)),
            ("hrv_rmssd".to_string(), self.rng.sample(&self.hrv)),
            ("gsr".to_string(), self.rng.gen_range(0.1..2.0)),
            ("temperature".to_string(), self.rng.sample(&self.temperature)),
            ("respiratory_rate".to_string(), self.rng.sample(&self.respiratory)),
        ]);

        let cognitive = HashMap::from([
            ("attention_level".to_string(), self.rng.gen_range(0.0..1.0)),
            ("cognitive_load".to_string(), self.rng.gen_range(0.0..1.0)),
            ("focus_stability".to_string(), self.rng.gen_range(0.0..1.0)),
            ("executive_function".to_string(), self.rng.gen_range(0.0..1.0)),
        ]);

        let behavioral = HashMap::from([
            ("typing_rhythm".to_string(), self.rng.gen_range(0.0..1.0)),
            ("mouse_dynamics".to_string(), self.rng.gen_range(0.0..1.0)),
            ("task_switching".to_string(), self.rng.gen_range(0..5) as f64),
            ("stress_indicators".to_string(), self.rng.gen_range(0.0..1.0)),
        ]);

        let environmental = HashMap::from([
            ("time_of_day".to_string(), local.hour() as f64),
            (
                "day_of_week".to_string(),
                local.weekday().num_days_from_monday() as f64,
            ),
            ("ambient_light".to_string(), self.rng.gen_range(0.0..1.0)),
            ("noise_level".to_string(), self.rng.gen_range(0.0..1.0)),
        ]);

        Reading {
            timestamp,
            physiological,
            cognitive,
            behavioral,
            environmental,
        }
    }
}

impl Default for SyntheticSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SyntheticSampler {
    fn sample(&mut self) -> Result<Reading, SampleError> {
        Ok(self.sample_at(Utc::now()))
    }
}
